//! Parent selection.
//!
//! Offspring workers select parents from a [`MatingPool`]: a read-only view
//! of the ranked population, its fitness cache, and the total fitness
//! computed once before the parallel phase starts.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::cache::FitnessCache;
use super::types::{Individual, Member};
use rand::Rng;

/// Read-only view of the current generation, shared by all offspring workers.
#[derive(Debug)]
pub struct MatingPool<'a, I> {
    members: &'a [Member<I>],
    cache: &'a FitnessCache,
    total_fitness: f64,
}

impl<'a, I: Individual> MatingPool<'a, I> {
    /// Creates a view over `members`.
    ///
    /// `total_fitness` should be the sum of the members' fitness values.
    pub fn new(members: &'a [Member<I>], cache: &'a FitnessCache, total_fitness: f64) -> Self {
        Self {
            members,
            cache,
            total_fitness,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the pool has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the individual at `index`, in stored (ranked) order.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn individual(&self, index: usize) -> &'a I {
        &self.members[index].individual
    }

    /// Returns the fitness of the member at `index`, through the cache.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn fitness(&self, index: usize) -> f64 {
        let member = &self.members[index];
        self.cache.get_fitness(member.id, &member.individual)
    }

    /// Sum of all members' fitness values.
    pub fn total_fitness(&self) -> f64 {
        self.total_fitness
    }

    /// Iterates over the individuals in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &'a I> + 'a {
        self.members.iter().map(|m| &m.individual)
    }
}

/// Fitness-proportionate (roulette wheel) selection. Returns an index.
///
/// Draws a threshold `t` uniformly from `[0, total)` and returns the first
/// member whose running fitness sum reaches `t`.
///
/// If the total is not a positive finite number no threshold can be drawn;
/// the first member is returned without touching `rng`. The first member is
/// also the fallback when rounding keeps the running sum below `t`.
///
/// # Complexity
/// O(n) per selection (linear scan)
///
/// # Panics
/// Panics if `pool` is empty.
pub fn roulette<I: Individual, R: Rng>(pool: &MatingPool<'_, I>, rng: &mut R) -> usize {
    assert!(!pool.is_empty(), "cannot select from empty population");

    let total = pool.total_fitness();
    if !(total > 0.0 && total.is_finite()) {
        return 0;
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for i in 0..pool.len() {
        cumulative += pool.fitness(i);
        if cumulative >= threshold {
            return i;
        }
    }

    0
}
