//! Error types for the evolution engine.
//!
//! Structural and configuration failures surface to the caller. Degenerate
//! but well-defined situations (e.g. a zero fitness total during selection)
//! are absorbed by the engine and never appear here.

use thiserror::Error;

/// Failure raised by a crossover or mutation operator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Parents handed to a crossover have different genome lengths.
    #[error("Parent length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// An operator that needs at least one gene received an empty genome.
    #[error("Genome is empty")]
    EmptyGenome,

    /// Order-preserving crossover could not fill the child because the
    /// parents are not permutations of the same gene set.
    #[error("Parents are not permutations of the same gene set")]
    NotAPermutation,

    /// The strategy in use has no mutation operator.
    ///
    /// Supply one (e.g. [`FixedPointModel::with_mutation`]) before running
    /// with a non-zero mutation rate.
    ///
    /// [`FixedPointModel::with_mutation`]: crate::ga::FixedPointModel::with_mutation
    #[error("Mutation operator must be overridden for this strategy")]
    MutationNotImplemented,

    /// Client-defined operator failure.
    #[error("Operator failed: {0}")]
    Custom(String),
}

/// Invalid engine configuration, detected before any generation runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("generation_count must be at least 1")]
    ZeroGenerations,

    #[error("population_size must be at least 1")]
    ZeroPopulation,

    #[error("mutation_rate must be within [0, 1], got {0}")]
    MutationRateOutOfRange(f64),

    #[error("elitism_rate must be within [0, 1], got {0}")]
    ElitismRateOutOfRange(f64),

    #[error("num_threads must be positive or None")]
    ZeroThreads,

    /// A non-zero mutation rate was configured for a strategy that cannot mutate.
    #[error("mutation_rate is positive but the strategy has no mutation operator")]
    MutationOperatorMissing,
}

/// Error returned by [`Engine`](crate::ga::Engine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// An operator failed while producing the offspring for `slot`.
    ///
    /// The generation is aborted and the population left as it was.
    #[error("Operator failed in generation {generation}, slot {slot}: {source}")]
    Operator {
        generation: usize,
        slot: usize,
        #[source]
        source: OperatorError,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No member qualified as best (only possible with
    /// [`BestSelection::PositiveOnly`](crate::ga::BestSelection::PositiveOnly)).
    #[error("No individual with positive fitness in the final population")]
    NoBestIndividual,
}
