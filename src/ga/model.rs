//! Variation strategies.
//!
//! A [`VariationStrategy`] bundles the three genetic operators the engine
//! applies to produce each offspring: parent selection, crossover, and
//! mutation. Two strategies ship with the crate:
//!
//! - [`FixedPointModel`]: single-point crossover for genomes where genes may
//!   repeat. It has no built-in mutation; supply one with
//!   [`FixedPointModel::with_mutation`].
//! - [`PermutationModel`]: order-preserving crossover and swap mutation for
//!   permutation genomes.
//!
//! Both use roulette selection. Client strategies implement the trait
//! directly and can delegate to the functions in [`operators`](super::operators).

use super::operators::{fixed_point_crossover, order_crossover, swap_mutation};
use super::selection::{roulette, MatingPool};
use super::types::{Chromosome, Individual};
use crate::error::OperatorError;
use rand::{Rng, RngCore};
use std::fmt;

/// Selection, crossover, and mutation for one genome representation.
///
/// # Thread Safety
///
/// Strategies must be `Send + Sync`: every offspring slot in a generation
/// calls into the same strategy, possibly from different rayon workers.
/// Operators receive a per-slot generator and must not keep state between
/// calls.
pub trait VariationStrategy<I: Individual>: Send + Sync {
    /// Selects one parent from the pool.
    ///
    /// The default is fitness-proportionate [`roulette`] selection.
    fn select_parent<'a, R: Rng>(&self, pool: &MatingPool<'a, I>, rng: &mut R) -> &'a I {
        pool.individual(roulette(pool, rng))
    }

    /// Combines two parents into one child.
    fn crossover<R: Rng>(&self, parent1: &I, parent2: &I, rng: &mut R) -> Result<I, OperatorError>;

    /// Perturbs an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut I, rng: &mut R) -> Result<(), OperatorError>;

    /// Whether [`mutate`](Self::mutate) is available.
    ///
    /// The engine checks this at construction and refuses a positive
    /// mutation rate when it returns `false`.
    fn supports_mutation(&self) -> bool {
        true
    }
}

type MutationFn<I> = dyn Fn(&mut I, &mut dyn RngCore) -> Result<(), OperatorError> + Send + Sync;

/// Single-point crossover strategy for sequence genomes.
///
/// Does not keep genes unique, so it suits genomes drawn from an alphabet
/// (strings, bit vectors) rather than permutations.
///
/// ```ignore
/// let model = FixedPointModel::with_mutation(|ind: &mut Letters, rng| {
///     let i = rng.random_range(0..ind.0.len());
///     ind.0[i] = b'a' + rng.random_range(0..26);
///     Ok(())
/// });
/// ```
pub struct FixedPointModel<I> {
    mutation: Option<Box<MutationFn<I>>>,
}

impl<I: Chromosome> FixedPointModel<I> {
    /// Creates the model without a mutation operator.
    ///
    /// Only usable with a mutation rate of 0.
    pub fn new() -> Self {
        Self { mutation: None }
    }

    /// Creates the model with a client mutation operator.
    pub fn with_mutation<F>(mutation: F) -> Self
    where
        F: Fn(&mut I, &mut dyn RngCore) -> Result<(), OperatorError> + Send + Sync + 'static,
    {
        Self {
            mutation: Some(Box::new(mutation)),
        }
    }
}

impl<I: Chromosome> Default for FixedPointModel<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for FixedPointModel<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedPointModel")
            .field("mutation", &self.mutation.is_some())
            .finish()
    }
}

impl<I: Chromosome> VariationStrategy<I> for FixedPointModel<I> {
    fn crossover<R: Rng>(&self, parent1: &I, parent2: &I, rng: &mut R) -> Result<I, OperatorError> {
        let genes = fixed_point_crossover(parent1.genes(), parent2.genes(), rng)?;
        Ok(parent1.with_genes(genes))
    }

    fn mutate<R: Rng>(&self, individual: &mut I, rng: &mut R) -> Result<(), OperatorError> {
        match &self.mutation {
            Some(mutation) => mutation(individual, rng),
            None => Err(OperatorError::MutationNotImplemented),
        }
    }

    fn supports_mutation(&self) -> bool {
        self.mutation.is_some()
    }
}

/// Order-preserving strategy for permutation genomes.
///
/// Crossover is OX ([`order_crossover`]), mutation swaps two genes. Both
/// keep a permutation a permutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermutationModel;

impl<I: Chromosome> VariationStrategy<I> for PermutationModel {
    fn crossover<R: Rng>(&self, parent1: &I, parent2: &I, rng: &mut R) -> Result<I, OperatorError> {
        let genes = order_crossover(parent1.genes(), parent2.genes(), rng)?;
        Ok(parent1.with_genes(genes))
    }

    fn mutate<R: Rng>(&self, individual: &mut I, rng: &mut R) -> Result<(), OperatorError> {
        swap_mutation(individual.genes_mut(), rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::cache::FitnessCache;
    use crate::ga::fixtures::{is_valid_permutation, mutate_letters, Letters, Scored, Tour};
    use crate::ga::types::Member;
    use crate::random::create_rng;

    #[test]
    fn test_fixed_point_crossover_keeps_length() {
        let model = FixedPointModel::<Letters>::new();
        let mut rng = create_rng(42);
        let p1 = Letters(b"aaaaaaaaaaaaa".to_vec());
        let p2 = Letters(b"zzzzzzzzzzzzz".to_vec());
        let child = model.crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(child.0.len(), 13);
    }

    #[test]
    fn test_fixed_point_structural_error() {
        let model = FixedPointModel::<Letters>::new();
        let mut rng = create_rng(42);
        let err = model
            .crossover(&Letters(b"abc".to_vec()), &Letters(b"ab".to_vec()), &mut rng)
            .unwrap_err();
        assert_eq!(err, OperatorError::LengthMismatch { left: 3, right: 2 });
    }

    #[test]
    fn test_fixed_point_default_mutation_unimplemented() {
        let model = FixedPointModel::<Letters>::default();
        let mut rng = create_rng(42);
        let mut ind = Letters(b"abc".to_vec());
        assert!(!model.supports_mutation());
        assert_eq!(
            model.mutate(&mut ind, &mut rng),
            Err(OperatorError::MutationNotImplemented)
        );
        assert_eq!(ind.0, b"abc".to_vec());
    }

    #[test]
    fn test_fixed_point_client_mutation() {
        let model = FixedPointModel::with_mutation(|ind: &mut Letters, rng: &mut dyn RngCore| {
            mutate_letters(ind, rng);
            Ok(())
        });
        assert!(model.supports_mutation());

        let mut rng = create_rng(42);
        let mut ind = Letters(b"aaaaaaaaaaaaa".to_vec());
        for _ in 0..50 {
            model.mutate(&mut ind, &mut rng).unwrap();
        }
        assert_ne!(ind.0, b"aaaaaaaaaaaaa".to_vec());
        assert_eq!(ind.0.len(), 13);
    }

    #[test]
    fn test_fixed_point_client_mutation_error_passes_through() {
        let model = FixedPointModel::with_mutation(|_: &mut Letters, _: &mut dyn RngCore| {
            Err(OperatorError::Custom("nope".into()))
        });
        let mut rng = create_rng(42);
        let mut ind = Letters(b"abc".to_vec());
        assert_eq!(
            model.mutate(&mut ind, &mut rng),
            Err(OperatorError::Custom("nope".into()))
        );
    }

    #[test]
    fn test_permutation_model_preserves_permutations() {
        let model = PermutationModel;
        let mut rng = create_rng(42);
        let p1 = Tour((0..12).collect());
        let p2 = Tour((0..12).rev().collect());

        for _ in 0..100 {
            let mut child = model.crossover(&p1, &p2, &mut rng).unwrap();
            assert!(is_valid_permutation(&child.0, 12));
            model.mutate(&mut child, &mut rng).unwrap();
            assert!(is_valid_permutation(&child.0, 12));
        }
        assert!(VariationStrategy::<Tour>::supports_mutation(&model));
    }

    #[test]
    fn test_permutation_model_structural_error() {
        let model = PermutationModel;
        let mut rng = create_rng(42);
        let result = model.crossover(&Tour(vec![0, 1, 2]), &Tour(vec![0, 1]), &mut rng);
        assert!(matches!(result, Err(OperatorError::LengthMismatch { .. })));
    }

    #[test]
    fn test_default_selection_degenerate_total() {
        let members: Vec<Member<Scored>> = (0..4).map(|i| Member::new(0, i, Scored(0.0))).collect();
        let cache = FitnessCache::new();
        let pool = MatingPool::new(&members, &cache, 0.0);
        let mut rng = create_rng(42);

        struct Plain;
        impl VariationStrategy<Scored> for Plain {
            fn crossover<R: Rng>(&self, p1: &Scored, _: &Scored, _: &mut R) -> Result<Scored, OperatorError> {
                Ok(p1.clone())
            }
            fn mutate<R: Rng>(&self, _: &mut Scored, _: &mut R) -> Result<(), OperatorError> {
                Ok(())
            }
        }

        for _ in 0..20 {
            let chosen = Plain.select_parent(&pool, &mut rng);
            assert!(std::ptr::eq(chosen, members[0].individual()));
        }
    }
}
