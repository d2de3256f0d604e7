//! The population and its generation-advance algorithm.
//!
//! One call to [`Population::evolve`]:
//!
//! 1. ranks members by fitness, descending (stable)
//! 2. keeps the top `floor(elitism_rate * n)` members unchanged
//! 3. fills every other slot with a child of two selected parents,
//!    mutated with probability `mutation_rate`, one slot per task
//! 4. swaps in the new members and invalidates the fitness total
//!
//! The offspring phase only reads the ranked population, the fitness
//! cache, and the precomputed total. Each task writes its own slot, and
//! `evolve` returns after every task has finished.

use super::cache::FitnessCache;
use super::config::{elite_count, BestSelection};
use super::executor::Executor;
use super::model::VariationStrategy;
use super::selection::MatingPool;
use super::types::{Individual, Member, MemberId};
use crate::error::{EngineError, OperatorError};
use crate::random::slot_rng;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// A fixed-size, ordered set of individuals.
#[derive(Debug)]
pub struct Population<I> {
    members: Vec<Member<I>>,
    cache: FitnessCache,
    total_fitness: Option<f64>,
    mutation_rate: f64,
    elitism_rate: f64,
    generation: usize,
}

impl<I: Individual> Population<I> {
    /// Creates generation 0 from seed individuals.
    ///
    /// Rates are taken as given; [`Engine`](super::Engine) validates them
    /// before building a population.
    pub fn new(individuals: Vec<I>, mutation_rate: f64, elitism_rate: f64) -> Self {
        let members = individuals
            .into_iter()
            .enumerate()
            .map(|(slot, ind)| Member::new(0, slot, ind))
            .collect();
        Self {
            members,
            cache: FitnessCache::new(),
            total_fitness: None,
            mutation_rate,
            elitism_rate,
            generation: 0,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of completed generation advances.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Number of elites carried over by each advance.
    pub fn elite_count(&self) -> usize {
        elite_count(self.elitism_rate, self.members.len())
    }

    /// Members in stored order.
    pub fn members(&self) -> &[Member<I>] {
        &self.members
    }

    /// Individuals in stored order.
    pub fn individuals(&self) -> impl Iterator<Item = &I> + '_ {
        self.members.iter().map(|m| &m.individual)
    }

    /// Fitness of the member at `index`, through the cache.
    pub fn fitness_of(&self, index: usize) -> Option<f64> {
        self.members
            .get(index)
            .map(|m| self.cache.get_fitness(m.id, &m.individual))
    }

    /// The fitness cache backing this population.
    pub fn cache(&self) -> &FitnessCache {
        &self.cache
    }

    /// Sum of all members' fitness.
    ///
    /// Computed on first use after each advance, then cached until the
    /// next one.
    pub fn total_fitness(&mut self) -> f64 {
        if let Some(total) = self.total_fitness {
            return total;
        }
        let total: f64 = self.members.iter().map(|m| self.fitness(m)).sum();
        self.total_fitness = Some(total);
        total
    }

    /// Returns the member with the greatest fitness.
    ///
    /// Ties go to the earliest member in stored order. With
    /// [`BestSelection::PositiveOnly`] a member must also have fitness
    /// above 0, so the result can be `None` for a non-empty population.
    pub fn best_individual(&self, rule: BestSelection) -> Option<&I> {
        let mut best: Option<&I> = None;
        let mut best_fitness = 0.0;
        for member in &self.members {
            let fitness = self.fitness(member);
            let seed = best.is_none() && rule == BestSelection::FirstIndividual;
            if seed || fitness > best_fitness {
                best = Some(&member.individual);
                best_fitness = fitness;
            }
        }
        best
    }

    /// Advances the population by one generation.
    ///
    /// On error the population is left ranked but otherwise unchanged, and
    /// the generation counter does not move. The error names the lowest
    /// slot whose operator failed.
    #[instrument(level = "debug", skip_all, fields(generation = self.generation + 1))]
    pub fn evolve<S, R>(
        &mut self,
        strategy: &S,
        rng: &mut R,
        executor: &Executor,
    ) -> Result<(), EngineError>
    where
        S: VariationStrategy<I>,
        R: Rng,
    {
        self.rank();

        let n = self.members.len();
        let elites = self.elite_count();
        let total = self.total_fitness();
        let next_generation = self.generation + 1;
        let mutation_rate = self.mutation_rate;
        let base_seed: u64 = rng.random();

        let offspring = {
            let pool = MatingPool::new(&self.members, &self.cache, total);
            executor.map_slots(elites..n, |slot| {
                let mut rng = slot_rng(base_seed, slot);
                breed(strategy, &pool, mutation_rate, &mut rng)
                    .map(|child| Member::new(next_generation, slot, child))
                    .map_err(|source| EngineError::Operator {
                        generation: next_generation,
                        slot,
                        source,
                    })
            })
        };
        let offspring = offspring.into_iter().collect::<Result<Vec<_>, _>>()?;

        self.members.truncate(elites);
        self.members.extend(offspring);
        self.total_fitness = None;
        self.generation = next_generation;

        let live: HashSet<MemberId> = self.members.iter().map(|m| m.id).collect();
        self.cache.retain_live(&live);

        debug!(
            elites,
            offspring = n - elites,
            previous_total = total,
            "generation advanced"
        );
        Ok(())
    }

    /// Sorts members by fitness, descending. Equal fitness keeps the
    /// current relative order.
    fn rank(&mut self) {
        let fitness: Vec<f64> = self.members.iter().map(|m| self.fitness(m)).collect();
        let mut order: Vec<usize> = (0..self.members.len()).collect();
        order.sort_by(|&a, &b| fitness[b].partial_cmp(&fitness[a]).unwrap_or(Ordering::Equal));

        let mut slots: Vec<Option<Member<I>>> =
            std::mem::take(&mut self.members).into_iter().map(Some).collect();
        self.members = order.into_iter().filter_map(|i| slots[i].take()).collect();
    }

    fn fitness(&self, member: &Member<I>) -> f64 {
        self.cache.get_fitness(member.id, &member.individual)
    }
}

/// Produces one offspring: two parents, crossover, optional mutation.
fn breed<I, S, R>(
    strategy: &S,
    pool: &MatingPool<'_, I>,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<I, OperatorError>
where
    I: Individual,
    S: VariationStrategy<I>,
    R: Rng,
{
    let parent1 = strategy.select_parent(pool, rng);
    let parent2 = strategy.select_parent(pool, rng);
    let mut child = strategy.crossover(parent1, parent2, rng)?;
    if rng.random::<f64>() < mutation_rate {
        strategy.mutate(&mut child, rng)?;
    }
    Ok(child)
}
