//! Core trait definitions for the engine.
//!
//! [`Individual`] is the contract every candidate solution implements.
//! [`Chromosome`] adds sequence access for genomes that are an ordered list
//! of genes, which is what the bundled variation strategies operate on.

use rand::Rng;

/// A candidate solution in the population.
///
/// Higher fitness is better (maximization). Fitness evaluation must be
/// pure and deterministic: the engine caches results and may evaluate the
/// same individual from several worker threads.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Letters(Vec<u8>);
///
/// impl Individual for Letters {
///     fn fitness(&self) -> f64 {
///         self.0.iter().zip(b"hello").filter(|(a, b)| a == b).count() as f64
///     }
///     fn spawn<R: Rng>(&self, rng: &mut R) -> Self {
///         Letters((0..5).map(|_| rng.random_range(b'a'..=b'z')).collect())
///     }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Evaluates this individual. Higher is better.
    fn fitness(&self) -> f64;

    /// Produces a fresh random individual of the same representation.
    ///
    /// `self` acts as a prototype: only its representation (and any
    /// problem context it carries) matters, not its genes. Used for
    /// population seeding only.
    fn spawn<R: Rng>(&self, rng: &mut R) -> Self;
}

/// An individual whose genome is an ordered sequence of genes.
///
/// The fixed-point and order-preserving strategies are generic over this
/// trait, so crossover and mutation work for any gene type without
/// inspecting the genome at runtime.
pub trait Chromosome: Individual {
    /// The gene type.
    type Gene: Clone + PartialEq + Send + Sync;

    /// Returns the genes in order.
    fn genes(&self) -> &[Self::Gene];

    /// Returns the genes for in-place modification.
    fn genes_mut(&mut self) -> &mut [Self::Gene];

    /// Builds a new individual of the same kind with the given genes.
    ///
    /// `self` is one of the parents; implementations can copy any
    /// problem context from it.
    fn with_genes(&self, genes: Vec<Self::Gene>) -> Self;
}

/// Identity of one population member.
///
/// A member keeps its id for as long as it survives (elites carry theirs
/// into later generations), so cached fitness stays valid. Offspring get
/// the generation that created them and the slot they were written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId {
    /// Generation in which the member was created (0 = seed population).
    pub generation: usize,
    /// Slot the member was written to in that generation.
    pub slot: usize,
}

/// An individual together with its identity.
#[derive(Debug, Clone)]
pub struct Member<I> {
    pub(crate) id: MemberId,
    pub(crate) individual: I,
}

impl<I> Member<I> {
    pub(crate) fn new(generation: usize, slot: usize, individual: I) -> Self {
        Self {
            id: MemberId { generation, slot },
            individual,
        }
    }

    /// Returns the member's identity.
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the wrapped individual.
    pub fn individual(&self) -> &I {
        &self.individual
    }
}
