//! Per-generation fitness memoization.

use super::types::{Individual, MemberId};
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

/// Memoizes fitness by member identity.
///
/// Safe to share between offspring workers. Two workers that miss on the
/// same member at the same time both evaluate it and store the same value;
/// evaluation is pure, so the race is harmless. The cache saves repeated
/// evaluations, it does not promise exactly one.
///
/// The population prunes the cache after every generation so it never
/// holds more entries than there are members.
#[derive(Debug, Default)]
pub struct FitnessCache {
    entries: RwLock<HashMap<MemberId, f64>>,
}

impl FitnessCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached fitness for `id`, evaluating `individual` on a miss.
    pub fn get_fitness<I: Individual>(&self, id: MemberId, individual: &I) -> f64 {
        if let Some(&fitness) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return fitness;
        }

        // Evaluate outside the lock; slow fitness functions must not
        // serialize the workers.
        let fitness = individual.fitness();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, fitness);
        fitness
    }

    /// Returns the cached value without evaluating.
    pub fn peek(&self, id: MemberId) -> Option<f64> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
    }

    /// Drops every entry whose id is not in `live`.
    pub fn retain_live(&mut self, live: &HashSet<MemberId>) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|id, _| live.contains(id));
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fixtures::Counted;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn id(generation: usize, slot: usize) -> MemberId {
        MemberId { generation, slot }
    }

    #[test]
    fn test_hit_skips_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ind = Counted {
            value: 3.5,
            calls: calls.clone(),
        };
        let cache = FitnessCache::new();

        let first = cache.get_fitness(id(0, 0), &ind);
        let second = cache.get_fitness(id(0, 0), &ind);

        assert_eq!(first, second);
        assert_eq!(first, 3.5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_matches_direct_evaluation() {
        let ind = crate::ga::fixtures::Letters(b"hello, there!".to_vec());
        let cache = FitnessCache::new();
        assert_eq!(cache.get_fitness(id(2, 7), &ind), ind.fitness());
        assert_eq!(cache.peek(id(2, 7)), Some(ind.fitness()));
    }

    #[test]
    fn test_distinct_ids_cached_separately() {
        let cache = FitnessCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Counted {
            value: 1.0,
            calls: calls.clone(),
        };
        let b = Counted {
            value: 2.0,
            calls: calls.clone(),
        };
        assert_eq!(cache.get_fitness(id(0, 0), &a), 1.0);
        assert_eq!(cache.get_fitness(id(0, 1), &b), 2.0);
        assert_eq!(cache.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retain_live_prunes() {
        let mut cache = FitnessCache::new();
        let ind = crate::ga::fixtures::Scored(1.0);
        for slot in 0..5 {
            cache.get_fitness(id(0, slot), &ind);
        }
        let live: HashSet<MemberId> = [id(0, 1), id(0, 3)].into_iter().collect();
        cache.retain_live(&live);

        assert_eq!(cache.len(), 2);
        assert!(cache.peek(id(0, 1)).is_some());
        assert!(cache.peek(id(0, 0)).is_none());
    }

    #[test]
    fn test_clear() {
        let mut cache = FitnessCache::new();
        cache.get_fitness(id(0, 0), &crate::ga::fixtures::Scored(1.0));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_reads_converge() {
        use rayon::prelude::*;

        let calls = Arc::new(AtomicUsize::new(0));
        let ind = Counted {
            value: 9.0,
            calls: calls.clone(),
        };
        let cache = FitnessCache::new();

        let values: Vec<f64> = (0..256)
            .into_par_iter()
            .map(|_| cache.get_fitness(id(1, 0), &ind))
            .collect();

        assert!(values.iter().all(|&v| v == 9.0));
        assert_eq!(cache.len(), 1);
        assert!(calls.load(Ordering::SeqCst) >= 1);
    }
}
