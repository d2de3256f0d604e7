//! Small genomes shared by the unit tests.

use super::types::{Chromosome, Individual};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fixed fitness, no genes. Used to drive selection and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored(pub f64);

impl Individual for Scored {
    fn fitness(&self) -> f64 {
        self.0
    }

    fn spawn<R: Rng>(&self, rng: &mut R) -> Self {
        Scored(rng.random_range(0.0..10.0))
    }
}

pub const TARGET: &[u8] = b"hello, world!";
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz,! ";

/// String-matching genome: one point per character equal to [`TARGET`].
#[derive(Debug, Clone, PartialEq)]
pub struct Letters(pub Vec<u8>);

impl Individual for Letters {
    fn fitness(&self) -> f64 {
        self.0
            .iter()
            .zip(TARGET)
            .filter(|(a, b)| a == b)
            .count() as f64
    }

    fn spawn<R: Rng>(&self, rng: &mut R) -> Self {
        Letters(
            (0..TARGET.len())
                .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
                .collect(),
        )
    }
}

impl Chromosome for Letters {
    type Gene = u8;

    fn genes(&self) -> &[u8] {
        &self.0
    }

    fn genes_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }

    fn with_genes(&self, genes: Vec<u8>) -> Self {
        Letters(genes)
    }
}

/// Replaces one random character with a random letter of the alphabet.
pub fn mutate_letters(ind: &mut Letters, rng: &mut dyn rand::RngCore) {
    let i = rng.random_range(0..ind.0.len());
    ind.0[i] = ALPHABET[rng.random_range(0..ALPHABET.len())];
}

/// Permutation genome: one point per gene sitting at its own index.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour(pub Vec<usize>);

impl Individual for Tour {
    fn fitness(&self) -> f64 {
        1.0 + self.0.iter().enumerate().filter(|&(i, &g)| i == g).count() as f64
    }

    fn spawn<R: Rng>(&self, rng: &mut R) -> Self {
        let mut genes: Vec<usize> = (0..self.0.len()).collect();
        for i in (1..genes.len()).rev() {
            genes.swap(i, rng.random_range(0..=i));
        }
        Tour(genes)
    }
}

impl Chromosome for Tour {
    type Gene = usize;

    fn genes(&self) -> &[usize] {
        &self.0
    }

    fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }

    fn with_genes(&self, genes: Vec<usize>) -> Self {
        Tour(genes)
    }
}

/// Counts how often its fitness is evaluated.
#[derive(Debug, Clone)]
pub struct Counted {
    pub value: f64,
    pub calls: Arc<AtomicUsize>,
}

impl Individual for Counted {
    fn fitness(&self) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.value
    }

    fn spawn<R: Rng>(&self, _rng: &mut R) -> Self {
        self.clone()
    }
}

/// Checks that `perm` contains each of `0..n` exactly once.
pub fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
    let mut seen = vec![false; n];
    perm.len() == n
        && perm
            .iter()
            .all(|&v| v < n && !std::mem::replace(&mut seen[v], true))
}
