use crate::board::Board;

/// Exact minimum traversal produced by the dynamic-programming recurrence.
/// Serves as the ground truth the genetic algorithm is measured against.
#[derive(Clone, Debug, PartialEq)]
pub struct DpSolution {
    pub cost: u64,
    pub path: Vec<usize>,
}

/// Bottom-up recurrence: cost[i] = board[i] + min(cost[i+1], cost[i+2]),
/// keeping a next-cell table to rebuild the path. O(n) time and space.
/// Ties between advancing and jumping resolve to the jump.
///
/// # Panics
///
/// Panics if the board has fewer than 2 cells; callers validate first.
pub fn solve(board: &Board) -> DpSolution {
    let n = board.len();
    assert!(n >= 2, "DP solver needs at least 2 cells, got {}", n);

    let mut cost: Vec<u64> = vec![0; n];
    // next[i] is the cell entered from cell i; None marks the destination
    let mut next: Vec<Option<usize>> = vec![None; n];

    cost[n - 1] = board.costs[n - 1];
    next[n - 1] = None;
    cost[n - 2] = board.costs[n - 2] + board.costs[n - 1];
    next[n - 2] = Some(n - 1);

    for i in (0..n.saturating_sub(2)).rev() {
        if cost[i + 1] < cost[i + 2] {
            cost[i] = board.costs[i] + cost[i + 1];
            next[i] = Some(i + 1);
        } else {
            cost[i] = board.costs[i] + cost[i + 2];
            next[i] = Some(i + 2);
        }
    }

    let mut path = vec![0];
    let mut cell = 0;
    while let Some(step) = next[cell] {
        path.push(step);
        cell = step;
    }

    DpSolution { cost: cost[0], path }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_cell_board() {
        let solution = solve(&Board::new(vec![5, 3]));
        assert_eq!(solution.cost, 8);
        assert_eq!(solution.path, vec![0, 1]);
    }

    #[test]
    fn test_reference_example() {
        let solution = solve(&Board::new(vec![1, 2, 3, 4]));
        assert_eq!(solution.cost, 7);
        assert_eq!(solution.path, vec![0, 1, 3]);
    }

    #[test]
    fn test_jump_is_preferred_over_expensive_cells() {
        let solution = solve(&Board::new(vec![0, 3, 80, 6, 57, 10]));
        assert_eq!(solution.cost, 19);
        assert_eq!(solution.path, vec![0, 1, 3, 5]);
    }

    #[test]
    fn test_path_always_reaches_last_cell() {
        let boards = [
            vec![0, 1],
            vec![9, 9, 9],
            vec![2, 44, 3, 1, 5, 6, 7, 8, 9, 10],
        ];
        for costs in boards {
            let n = costs.len();
            let solution = solve(&Board::new(costs));
            assert_eq!(*solution.path.first().unwrap(), 0);
            assert_eq!(*solution.path.last().unwrap(), n - 1);
            for pair in solution.path.windows(2) {
                let step = pair[1] - pair[0];
                assert!(step == 1 || step == 2, "illegal step of {}", step);
            }
        }
    }

    #[test]
    fn test_cost_matches_path_sum() {
        let board = Board::new(vec![7, 3, 0, 4, 4, 12, 1]);
        let solution = solve(&board);
        let path_sum: u64 = solution.path.iter().map(|&i| board.costs[i]).sum();
        assert_eq!(solution.cost, path_sum);
    }
}
