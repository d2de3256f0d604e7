//! Generation-stepping genetic algorithm engine.
//!
//! Evolves a fixed-size population of candidate solutions for a fixed
//! number of generations using:
//!
//! - **Roulette selection**: fitness-proportionate parent choice with a
//!   deterministic fallback when the fitness total is not positive.
//! - **Pluggable variation strategies**: fixed-point crossover for
//!   alphabet genomes, order-preserving crossover and swap mutation for
//!   permutations, or client-defined operators.
//! - **Elitism**: the top fraction of each generation survives unchanged.
//! - **Parallel offspring production**: one task per offspring slot on a
//!   bounded rayon pool, with per-slot generators so seeded runs are
//!   reproducible regardless of scheduling.
//! - **Fitness caching**: each member is evaluated once per lifetime in
//!   the population, safely shared between workers.
//!
//! # Example
//!
//! ```
//! use evo_engine::ga::{Chromosome, Engine, EvolutionConfig, Individual, PermutationModel};
//! use rand::Rng;
//!
//! #[derive(Clone, Debug)]
//! struct Order(Vec<usize>);
//!
//! impl Individual for Order {
//!     fn fitness(&self) -> f64 {
//!         1.0 + self.0.iter().enumerate().filter(|&(i, &g)| i == g).count() as f64
//!     }
//!     fn spawn<R: Rng>(&self, rng: &mut R) -> Self {
//!         let mut genes = self.0.clone();
//!         for i in (1..genes.len()).rev() {
//!             genes.swap(i, rng.random_range(0..=i));
//!         }
//!         Order(genes)
//!     }
//! }
//!
//! impl Chromosome for Order {
//!     type Gene = usize;
//!     fn genes(&self) -> &[usize] { &self.0 }
//!     fn genes_mut(&mut self) -> &mut [usize] { &mut self.0 }
//!     fn with_genes(&self, genes: Vec<usize>) -> Self { Order(genes) }
//! }
//!
//! let config = EvolutionConfig::default()
//!     .with_generation_count(20)
//!     .with_population_size(50)
//!     .with_seed(7);
//! let mut engine = Engine::new(config, PermutationModel, &Order((0..8).collect())).unwrap();
//! let best = engine.run().unwrap();
//! assert_eq!(best.0.len(), 8);
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{ConfigError, EngineError, OperatorError};
