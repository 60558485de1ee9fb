use crate::board::Board;
use crate::chromosome::Chromosome;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// An ordered set of chromosomes. The vector index is the chromosome
/// identifier used across cost, fitness and mating-partition data, so the
/// order is never sorted or shuffled during a run.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Population {
    pub individuals: Vec<Chromosome>,
}

impl Population {
    pub fn new() -> Population {
        Population {
            individuals: Vec::new(),
        }
    }

    /// Fill with `size` random valid chromosomes of `n_genes` genes each.
    pub fn generate(&mut self, size: usize, n_genes: usize, rng: &mut ChaCha8Rng) {
        self.individuals.reserve(size);
        for _ in 0..size {
            self.individuals.push(Chromosome::random(n_genes, rng));
        }
    }

    /// Score every chromosome against the board. Evaluation is pure per
    /// chromosome, so the pass runs in parallel without touching the
    /// sequential random stream.
    pub fn fit(&mut self, board: &Board) {
        self.individuals
            .par_iter_mut()
            .for_each(|i| i.evaluate(board));
    }

    /// Re-score only the identifiers replaced this generation.
    pub fn fit_changed(&mut self, changed: &[usize], board: &Board) {
        for &id in changed {
            self.individuals[id].evaluate(board);
        }
    }

    /// Identifier and chromosome with the lowest current cost.
    ///
    /// # Panics
    ///
    /// Panics on an empty population.
    pub fn best(&self) -> (usize, &Chromosome) {
        self.individuals
            .iter()
            .enumerate()
            .min_by_key(|(_, i)| i.cost)
            .map(|(id, i)| (id, i))
            .expect("best() called on an empty population")
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome;
    use rand::SeedableRng;

    #[test]
    fn test_generate_produces_requested_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(999);
        let mut pop = Population::new();
        pop.generate(18, 6, &mut rng);
        assert_eq!(pop.len(), 18);
        for individual in &pop.individuals {
            assert!(chromosome::is_valid(&individual.genes));
        }
    }

    #[test]
    fn test_fit_scores_every_chromosome() {
        let board = Board::new(vec![0, 3, 80, 6, 57, 10]);
        let mut rng = ChaCha8Rng::seed_from_u64(999);
        let mut pop = Population::new();
        pop.generate(18, board.len(), &mut rng);
        pop.fit(&board);

        for individual in &pop.individuals {
            let expected: u64 = individual
                .genes
                .iter()
                .enumerate()
                .filter(|(_, &g)| g == 1)
                .map(|(i, _)| board.costs[i])
                .sum();
            assert_eq!(individual.cost, expected);
            assert_eq!(individual.fitness, 1.0 / expected as f64);
        }
    }

    #[test]
    fn test_fit_changed_leaves_other_scores_alone() {
        let board = Board::new(vec![1, 2, 3, 4]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut pop = Population::new();
        pop.generate(6, board.len(), &mut rng);
        pop.fit(&board);

        // Corrupt one genome behind the evaluator's back, then refresh it
        pop.individuals[2].genes = vec![1, 0, 1, 1];
        let stale = pop.individuals[3].cost;
        pop.fit_changed(&[2], &board);

        assert_eq!(pop.individuals[2].cost, 8);
        assert_eq!(pop.individuals[3].cost, stale);
    }

    #[test]
    fn test_best_returns_lowest_cost() {
        let board = Board::new(vec![1, 2, 3, 4]);
        let mut pop = Population::new();
        for genes in [vec![1, 1, 1, 1], vec![1, 1, 0, 1], vec![1, 0, 1, 1]] {
            pop.individuals.push(Chromosome {
                genes,
                cost: 0,
                fitness: 0.0,
                epoch: 0,
            });
        }
        pop.fit(&board);
        let (id, best) = pop.best();
        assert_eq!(id, 1);
        assert_eq!(best.cost, 7);
    }
}
