//! Engine: drives a population through a fixed number of generations.
//!
//! [`Engine`] validates its configuration, seeds the population, and then
//! advances it exactly `generation_count` times:
//! seeding → (rank → elites → offspring → swap) × N → best individual.

use super::config::EvolutionConfig;
use super::executor::Executor;
use super::model::VariationStrategy;
use super::population::Population;
use super::types::Individual;
use crate::error::{ConfigError, EngineError};
use crate::random::create_rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// Summary of one generation, recorded after each advance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number (1 = after the first advance).
    pub generation: usize,

    /// Greatest fitness in the population.
    pub best_fitness: f64,

    /// Mean fitness of the population.
    pub mean_fitness: f64,

    /// Sum of all fitness values.
    pub total_fitness: f64,
}

/// Runs the evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let config = EvolutionConfig::default()
///     .with_generation_count(40)
///     .with_population_size(2500)
///     .with_mutation_rate(0.5)
///     .with_seed(42);
/// let model = FixedPointModel::with_mutation(mutate_letters);
/// let mut engine = Engine::new(config, model, &Letters::default())?;
/// let best = engine.run_with_observer(|best| println!("{best:?}"))?;
/// ```
pub struct Engine<I, S> {
    config: EvolutionConfig,
    strategy: S,
    population: Population<I>,
    executor: Executor,
    rng: StdRng,
    history: Vec<GenerationStats>,
}

impl<I, S> Engine<I, S>
where
    I: Individual,
    S: VariationStrategy<I>,
{
    /// Creates an engine whose population is seeded from `prototype`.
    ///
    /// See [`with_seed_factory`](Self::with_seed_factory).
    pub fn new(config: EvolutionConfig, strategy: S, prototype: &I) -> Result<Self, EngineError> {
        Self::with_seed_factory(config, strategy, |rng| prototype.spawn(rng))
    }

    /// Creates an engine whose population is seeded by `factory`.
    ///
    /// `factory` is called `population_size` times with the engine's
    /// generator.
    ///
    /// # Errors
    /// [`EngineError::Config`] if the configuration is invalid, or if the
    /// mutation rate is positive and the strategy cannot mutate.
    /// [`EngineError::ThreadPool`] if a dedicated pool cannot be built.
    pub fn with_seed_factory<F>(
        config: EvolutionConfig,
        strategy: S,
        mut factory: F,
    ) -> Result<Self, EngineError>
    where
        F: FnMut(&mut StdRng) -> I,
    {
        config.validate()?;
        if config.mutation_rate > 0.0 && !strategy.supports_mutation() {
            return Err(ConfigError::MutationOperatorMissing.into());
        }
        let executor = Executor::from_config(&config)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let individuals: Vec<I> = (0..config.population_size)
            .map(|_| factory(&mut rng))
            .collect();
        let population = Population::new(individuals, config.mutation_rate, config.elitism_rate);

        debug!(
            population_size = config.population_size,
            elite_count = population.elite_count(),
            workers = executor.parallelism(),
            "population seeded"
        );

        Ok(Self {
            config,
            strategy,
            population,
            executor,
            rng,
            history: Vec::new(),
        })
    }

    /// Runs all remaining generations and returns the best individual.
    pub fn run(&mut self) -> Result<I, EngineError> {
        self.run_with_observer(|_| {})
    }

    /// Runs all remaining generations, calling `observer` with each
    /// generation's best individual before the next one starts.
    ///
    /// The generation counter stops at `generation_count`; calling this
    /// again on a finished engine advances nothing and returns the final
    /// best individual. If an operator fails the run stops with the error,
    /// and the engine stays at the last completed generation.
    ///
    /// The observer is skipped for a generation that has no best
    /// individual (possible only with
    /// [`BestSelection::PositiveOnly`](super::BestSelection::PositiveOnly)).
    #[instrument(level = "info", skip_all, fields(generations = self.config.generation_count))]
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> Result<I, EngineError>
    where
        F: FnMut(&I),
    {
        info!(
            population_size = self.config.population_size,
            start = self.generation(),
            "evolution started"
        );

        while !self.is_finished() {
            self.advance()?;
            if let Some(best) = self.best_individual() {
                observer(best);
            }
        }

        let best = self
            .best_individual()
            .cloned()
            .ok_or(EngineError::NoBestIndividual)?;
        info!(
            generation = self.generation(),
            best_fitness = best.fitness(),
            "evolution finished"
        );
        Ok(best)
    }

    /// Best individual of the current population, per the configured rule.
    pub fn best_individual(&self) -> Option<&I> {
        self.population.best_individual(self.config.best_selection)
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    /// Whether all configured generations have run.
    pub fn is_finished(&self) -> bool {
        self.generation() >= self.config.generation_count
    }

    /// The current population.
    pub fn population(&self) -> &Population<I> {
        &self.population
    }

    /// Statistics for every completed generation, oldest first.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The variation strategy in use.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        self.population
            .evolve(&self.strategy, &mut self.rng, &self.executor)?;

        let stats = self.stats();
        debug!(
            generation = stats.generation,
            best_fitness = stats.best_fitness,
            mean_fitness = stats.mean_fitness,
            "generation complete"
        );
        self.history.push(stats);
        Ok(())
    }

    fn stats(&mut self) -> GenerationStats {
        let total_fitness = self.population.total_fitness();
        let best_fitness = (0..self.population.len())
            .filter_map(|i| self.population.fitness_of(i))
            .fold(f64::NEG_INFINITY, f64::max);
        GenerationStats {
            generation: self.population.generation(),
            best_fitness,
            mean_fitness: total_fitness / self.population.len() as f64,
            total_fitness,
        }
    }
}

impl<I, S> std::fmt::Debug for Engine<I, S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .field("generation", &self.history.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
