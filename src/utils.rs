use crate::board::Board;
use crate::experiment::BoardOutcome;

/// Render a visited-index sequence as "0 -> 1 -> 3".
pub fn display_path(path: &[usize]) -> String {
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<String>>()
        .join(" -> ")
}

/// Render the costs of the visited cells in path order.
pub fn display_path_contents(path: &[usize], board: &Board) -> String {
    path.iter()
        .map(|&i| board.costs[i].to_string())
        .collect::<Vec<String>>()
        .join(" -> ")
}

/// Multi-line per-board report in the layout of the console output:
/// board, DP section, GA section, match marker.
pub fn display_outcome(outcome: &BoardOutcome) -> String {
    let mut str = String::new();
    str.push_str(&format!("game board: {:?}\n", outcome.board.costs));
    str.push_str("___________________________\n");
    str.push_str("DP Solution\n");
    str.push_str(&format!("Minimum Cost: {}\n", outcome.dp_cost));
    str.push_str(&format!(
        "path showing indices of visited cells: {}\n",
        display_path(&outcome.dp_path)
    ));
    str.push_str(&format!(
        "path showing contents of visited cells: {}\n",
        display_path_contents(&outcome.dp_path, &outcome.board)
    ));
    str.push_str("___________________________\n");
    str.push_str(&format!("GA Solution ({} generations)\n", outcome.generations));
    str.push_str(&format!("Minimum Cost: {}\n", outcome.ga_cost));
    str.push_str(&format!(
        "path showing indices of visited cells: {}\n",
        display_path(&outcome.ga_path)
    ));
    str.push_str(&format!(
        "path showing contents of visited cells: {}\n",
        display_path_contents(&outcome.ga_path, &outcome.board)
    ));
    str.push_str(if outcome.matched {
        "GA matched the DP optimum\n"
    } else {
        "GA missed the DP optimum\n"
    });
    str
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(&[0, 1, 3]), "0 -> 1 -> 3");
        assert_eq!(display_path(&[0]), "0");
        assert_eq!(display_path(&[]), "");
    }

    #[test]
    fn test_display_path_contents() {
        let board = Board::new(vec![1, 2, 3, 4]);
        assert_eq!(display_path_contents(&[0, 1, 3], &board), "1 -> 2 -> 4");
    }

    #[test]
    fn test_display_outcome_mentions_both_solvers() {
        let board = Board::new(vec![1, 2, 3, 4]);
        let outcome = BoardOutcome {
            board,
            dp_cost: 7,
            dp_path: vec![0, 1, 3],
            ga_cost: 7,
            ga_path: vec![0, 1, 3],
            generations: 42,
            matched: true,
        };
        let rendered = display_outcome(&outcome);
        assert!(rendered.contains("DP Solution"));
        assert!(rendered.contains("GA Solution (42 generations)"));
        assert!(rendered.contains("0 -> 1 -> 3"));
        assert!(rendered.contains("matched"));
    }
}
