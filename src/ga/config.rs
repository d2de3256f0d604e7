//! Engine configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control a run.

use crate::error::ConfigError;

/// How the best individual of a population is determined.
///
/// Both variants return the earliest member with the greatest fitness.
/// They differ only when no member has positive fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BestSelection {
    /// The scan starts from the first member, so a non-empty population
    /// always has a best individual, even if all fitness values are `<= 0`.
    #[default]
    FirstIndividual,

    /// The scan starts from a fitness of 0 and only accepts members that
    /// beat it. A population with no positive fitness has no best
    /// individual.
    PositiveOnly,
}

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use evo_engine::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generation_count, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evo_engine::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_generation_count(40)
///     .with_elitism_rate(0.1)
///     .with_mutation_rate(0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
///
/// Builders store values as given. Out-of-range values are reported by
/// [`validate`](Self::validate), which the engine calls before seeding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of generation advances per run. Must be at least 1.
    pub generation_count: usize,

    /// Number of individuals, constant across generations. Must be at least 1.
    pub population_size: usize,

    /// Probability that a freshly crossed child is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of the population carried over unchanged (0.0–1.0).
    ///
    /// The elite count is `floor(elitism_rate * population_size)`.
    pub elitism_rate: f64,

    /// Whether offspring are produced in parallel using rayon.
    ///
    /// Parallel and sequential runs with the same seed produce the same
    /// populations.
    pub parallel: bool,

    /// Worker count for a dedicated thread pool.
    ///
    /// `None` uses rayon's global pool, sized to the available hardware
    /// parallelism. Ignored when `parallel` is `false`.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Rule for reporting the best individual.
    pub best_selection: BestSelection,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generation_count: 100,
            population_size: 100,
            mutation_rate: 0.1,
            elitism_rate: 0.1,
            parallel: true,
            num_threads: None,
            seed: None,
            best_selection: BestSelection::default(),
        }
    }
}

impl EvolutionConfig {
    /// Sets the number of generations.
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elitism rate.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    /// Enables or disables parallel offspring production.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs offspring production on a dedicated pool of `n` threads.
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the best-individual rule.
    pub fn with_best_selection(mut self, rule: BestSelection) -> Self {
        self.best_selection = rule;
        self
    }

    /// Number of elites carried into each new generation.
    pub fn elite_count(&self) -> usize {
        elite_count(self.elitism_rate, self.population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation_count == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if !(0.0..=1.0).contains(&self.elitism_rate) {
            return Err(ConfigError::ElitismRateOutOfRange(self.elitism_rate));
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

/// `floor(rate * population_size)`, never more than the population.
pub(crate) fn elite_count(rate: f64, population_size: usize) -> usize {
    ((population_size as f64 * rate) as usize).min(population_size)
}
