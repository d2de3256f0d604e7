//! Generic sequence crossover and mutation operators.
//!
//! All operators are generic over the gene type and work on plain slices,
//! so any [`Chromosome`](super::Chromosome) can reuse them.
//!
//! # Crossover Operators
//!
//! - [`fixed_point_crossover`]: single cut point, head from parent1 and
//!   tail from parent2. Genes may repeat.
//! - [`order_crossover`] (OX): Davis (1985). Keeps a segment of parent1 in
//!   place and fills the rest in parent2's circular order. Children of two
//!   permutations of the same set are permutations of that set.
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two random positions. O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::OperatorError;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Draws `k` uniformly from `0..n`; the child takes genes `[0, k)` from
/// `parent1` and `[k, n)` from `parent2`.
///
/// # Errors
/// [`OperatorError::LengthMismatch`] if the parents differ in length,
/// [`OperatorError::EmptyGenome`] if they are empty.
pub fn fixed_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Result<Vec<T>, OperatorError> {
    let n = check_parents(parent1, parent2)?;
    let point = rng.random_range(0..n);
    Ok(fixed_point_crossover_at(parent1, parent2, point))
}

/// Single-point crossover at a given cut point.
///
/// # Panics
/// Panics if `point > parent1.len()` or `point > parent2.len()`.
pub fn fixed_point_crossover_at<T: Clone>(parent1: &[T], parent2: &[T], point: usize) -> Vec<T> {
    let mut child = Vec::with_capacity(parent1.len());
    child.extend_from_slice(&parent1[..point]);
    child.extend_from_slice(&parent2[point..]);
    child
}

/// Order Crossover (OX).
///
/// Draws two cut points `b1 <= b2` from `0..n` and delegates to
/// [`order_crossover_at`].
///
/// # Errors
/// [`OperatorError::LengthMismatch`] or [`OperatorError::EmptyGenome`] for
/// malformed parents, [`OperatorError::NotAPermutation`] if the parents are
/// not permutations of the same gene set.
pub fn order_crossover<T: Clone + PartialEq, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Result<Vec<T>, OperatorError> {
    let n = check_parents(parent1, parent2)?;
    let (b1, b2) = random_cut_points(n, rng);
    order_crossover_at(parent1, parent2, b1, b2)
}

/// Order Crossover (OX) with fixed cut points.
///
/// 1. Copy `parent1[b1..b2]` into the child at the same positions
/// 2. Walk `parent2` circularly from index `b2`, skipping genes already
///    in the child, and place each remaining gene at the child cursor,
///    which also starts at `b2` and wraps around
///
/// ```
/// use evo_engine::ga::operators::order_crossover_at;
///
/// let p1 = ['A', 'B', 'C', 'D', 'E'];
/// let p2 = ['B', 'D', 'A', 'E', 'C'];
/// let child = order_crossover_at(&p1, &p2, 1, 3).unwrap();
/// assert_eq!(child, vec!['A', 'B', 'C', 'E', 'D']);
/// ```
///
/// # Complexity
/// O(n²) time (membership test needs only `PartialEq`), O(n) space
///
/// # Errors
/// See [`order_crossover`].
///
/// # Panics
/// Panics unless `b1 <= b2 <= n`.
pub fn order_crossover_at<T: Clone + PartialEq>(
    parent1: &[T],
    parent2: &[T],
    b1: usize,
    b2: usize,
) -> Result<Vec<T>, OperatorError> {
    let n = check_parents(parent1, parent2)?;
    assert!(b1 <= b2 && b2 <= n, "cut points out of order or range");

    let mut child: Vec<Option<T>> = vec![None; n];
    for i in b1..b2 {
        child[i] = Some(parent1[i].clone());
    }

    let mut remaining = n - (b2 - b1);
    let mut cursor = b2;
    for offset in 0..n {
        if remaining == 0 {
            break;
        }
        let gene = &parent2[(b2 + offset) % n];
        if child.iter().flatten().any(|g| g == gene) {
            continue;
        }
        child[cursor % n] = Some(gene.clone());
        cursor += 1;
        remaining -= 1;
    }

    if remaining > 0 {
        return Err(OperatorError::NotAPermutation);
    }
    child
        .into_iter()
        .collect::<Option<Vec<T>>>()
        .ok_or(OperatorError::NotAPermutation)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two random positions.
///
/// Both positions are drawn independently, so they may coincide. Genomes
/// with fewer than two genes are left unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<T, R: Rng>(genes: &mut [T], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

/// Validates a pair of parents and returns their common length.
fn check_parents<T>(parent1: &[T], parent2: &[T]) -> Result<usize, OperatorError> {
    if parent1.len() != parent2.len() {
        return Err(OperatorError::LengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }
    if parent1.is_empty() {
        return Err(OperatorError::EmptyGenome);
    }
    Ok(parent1.len())
}

/// Pick two cut points `b1 <= b2` within `0..n`.
fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
