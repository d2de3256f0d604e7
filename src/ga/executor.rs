//! Fan-out of per-slot offspring work.

use super::config::EvolutionConfig;
use crate::error::EngineError;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::ops::Range;

/// Where offspring slots are computed.
///
/// Parallel variants run on a bounded rayon pool, never one thread per
/// slot. Every variant returns results in slot order.
#[derive(Debug)]
pub enum Executor {
    /// Plain loop on the calling thread.
    Sequential,
    /// rayon's global pool.
    Global,
    /// A dedicated pool with a fixed number of workers.
    Pool(ThreadPool),
}

impl Executor {
    /// Builds the executor described by `config`.
    pub fn from_config(config: &EvolutionConfig) -> Result<Self, EngineError> {
        if !config.parallel {
            return Ok(Self::Sequential);
        }
        match config.num_threads {
            None => Ok(Self::Global),
            Some(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("evo-worker-{i}"))
                    .build()?;
                Ok(Self::Pool(pool))
            }
        }
    }

    /// Number of workers that can run slots concurrently.
    pub fn parallelism(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Global => rayon::current_num_threads(),
            Self::Pool(pool) => pool.current_num_threads(),
        }
    }

    /// Applies `f` to every slot in `slots` and returns the results in
    /// slot order. Blocks until every slot is done.
    pub fn map_slots<T, F>(&self, slots: Range<usize>, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync,
    {
        match self {
            Self::Sequential => slots.map(f).collect(),
            Self::Global => slots.into_par_iter().map(f).collect(),
            Self::Pool(pool) => pool.install(|| slots.into_par_iter().map(f).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_when_not_parallel() {
        let config = EvolutionConfig::default().with_parallel(false).with_num_threads(4);
        let executor = Executor::from_config(&config).unwrap();
        assert!(matches!(executor, Executor::Sequential));
        assert_eq!(executor.parallelism(), 1);
    }

    #[test]
    fn test_dedicated_pool_size() {
        let config = EvolutionConfig::default().with_num_threads(3);
        let executor = Executor::from_config(&config).unwrap();
        assert_eq!(executor.parallelism(), 3);
    }

    #[test]
    fn test_results_in_slot_order() {
        for executor in [
            Executor::Sequential,
            Executor::Global,
            Executor::from_config(&EvolutionConfig::default().with_num_threads(2)).unwrap(),
        ] {
            let out = executor.map_slots(5..105, |i| i * 2);
            let expected: Vec<usize> = (5..105).map(|i| i * 2).collect();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_empty_range() {
        let out: Vec<usize> = Executor::Global.map_slots(3..3, |i| i);
        assert!(out.is_empty());
    }
}
