//! Genetic algorithm engine.
//!
//! A generation-stepping engine built on trait-based abstractions. Users
//! describe candidate solutions by implementing [`Individual`] (and
//! [`Chromosome`] for sequence genomes) and pick or write a
//! [`VariationStrategy`].
//!
//! # Core Traits
//!
//! - [`Individual`]: a candidate solution with a pure fitness function
//!   (higher is better) and a random generator
//! - [`Chromosome`]: sequence access for gene-list genomes
//! - [`VariationStrategy`]: selection, crossover, mutation
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: run parameters (generations, rates, parallelism)
//! - [`Engine`]: executes the evolutionary loop
//! - [`Population`]: ranking, elitism, and the parallel generation advance
//! - [`FitnessCache`]: per-generation fitness memoization
//! - [`FixedPointModel`], [`PermutationModel`]: bundled strategies
//!
//! # Submodules
//!
//! - [`operators`]: generic fixed-point and order crossover, swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod cache;
mod config;
mod executor;
#[cfg(test)]
mod fixtures;
mod model;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use cache::FitnessCache;
pub use config::{BestSelection, EvolutionConfig};
pub use executor::Executor;
pub use model::{FixedPointModel, PermutationModel, VariationStrategy};
pub use population::Population;
pub use runner::{Engine, GenerationStats};
pub use selection::{roulette, MatingPool};
pub use types::{Chromosome, Individual, Member, MemberId};
