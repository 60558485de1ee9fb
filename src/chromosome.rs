use crate::board::Board;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One candidate traversal of a board. Each gene decides whether the
/// matching cell is occupied (1) or jumped over (0).
///
/// Structural invariants, maintained by every constructor and operator:
/// - `genes[0] == 1` and `genes[n-1] == 1`
/// - no two adjacent genes are both 0 (a jump never clears more than one cell)
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Chromosome {
    /// Occupy/jump decision per board cell
    pub genes: Vec<u8>,
    /// Sum of the costs of the occupied cells, refreshed by `evaluate`
    pub cost: u64,
    /// 1.0 / cost, refreshed by `evaluate`
    pub fitness: f64,
    /// Generation that produced this genome
    pub epoch: usize,
}

impl Chromosome {
    /// Draw a random valid chromosome of `n` genes. First and last genes are
    /// forced to 1; each interior gene is a uniform random bit, repaired
    /// immediately so the single left-to-right pass can never leave a double
    /// zero behind.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`: the encoding needs distinct first and last cells.
    pub fn random(n: usize, rng: &mut ChaCha8Rng) -> Chromosome {
        assert!(n >= 2, "chromosome needs at least 2 genes, got {}", n);

        let mut genes: Vec<u8> = Vec::with_capacity(n);
        for i in 0..n {
            if i == 0 || i == n - 1 {
                genes.push(1);
            } else {
                genes.push(rng.gen_range(0..=1));
            }
            if i > 0 && has_double_zero(&genes, i - 1) {
                genes[i] = 1;
            }
        }

        Chromosome {
            genes,
            cost: 0,
            fitness: 0.0,
            epoch: 0,
        }
    }

    /// Recompute cost and fitness against `board`. Cost is the exact sum of
    /// the occupied cell costs; fitness is its inverse, so cheaper
    /// chromosomes score higher.
    pub fn evaluate(&mut self, board: &Board) {
        self.cost = self
            .genes
            .iter()
            .zip(board.costs.iter())
            .filter(|(&gene, _)| gene == 1)
            .map(|(_, &cost)| cost)
            .sum();
        self.fitness = 1.0 / self.cost as f64;
    }

    /// Decode the genome into the ordered indices of visited cells.
    pub fn path(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter(|(_, &gene)| gene == 1)
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genes {
            write!(f, "{}", gene)?;
        }
        write!(f, " [cost {}]", self.cost)
    }
}

impl fmt::Debug for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chromosome {{ genes: {:?}, cost: {}, fitness: {}, epoch: {} }}",
            self.genes, self.cost, self.fitness, self.epoch
        )
    }
}

/// True iff `genes[i]` and `genes[i+1]` are both 0, the only illegal local
/// pattern of the encoding.
pub fn has_double_zero(genes: &[u8], i: usize) -> bool {
    genes[i] == 0 && genes[i + 1] == 0
}

/// Undo a gene write at `i` that created a double zero with either
/// neighbor, by forcing the gene back to 1. Forcing to 1 can never create a
/// new violation elsewhere, so a single call is always enough.
pub fn repair_double_zero(genes: &mut [u8], i: usize) {
    if genes[i] != 0 {
        return;
    }
    let clashes_left = i > 0 && genes[i - 1] == 0;
    let clashes_right = i + 1 < genes.len() && genes[i + 1] == 0;
    if clashes_left || clashes_right {
        genes[i] = 1;
    }
}

/// Full structural check, used by tests and debug assertions.
pub fn is_valid(genes: &[u8]) -> bool {
    if genes.len() < 2 {
        return false;
    }
    if genes[0] != 1 || genes[genes.len() - 1] != 1 {
        return false;
    }
    (0..genes.len() - 1).all(|i| !has_double_zero(genes, i))
}
