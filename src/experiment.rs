use crate::board::Board;
use crate::dp::DpSolution;
use crate::ga::GaAnswer;
use crate::param::Param;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;

//-----------------------------------------------------------------------------
// Run report structures and methods
//-----------------------------------------------------------------------------

/// DP and GA results for one board, plus whether the GA matched the optimum.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoardOutcome {
    pub board: Board,
    pub dp_cost: u64,
    pub dp_path: Vec<usize>,
    pub ga_cost: u64,
    pub ga_path: Vec<usize>,
    /// Generations the GA ran before its stopping rule fired
    pub generations: usize,
    pub matched: bool,
}

impl BoardOutcome {
    pub fn new(board: Board, exact: &DpSolution, answer: &GaAnswer) -> BoardOutcome {
        BoardOutcome {
            board,
            dp_cost: exact.cost,
            dp_path: exact.path.clone(),
            ga_cost: answer.best.cost,
            ga_path: answer.path.clone(),
            generations: answer.generations,
            matched: answer.best.cost == exact.cost,
        }
    }
}

/// Complete record of one run over a board file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Experiment {
    pub id: String,
    pub jumpga_version: String,
    pub timestamp: String,
    pub parameters: Param,
    pub outcomes: Vec<BoardOutcome>,
    /// Share of boards where the GA reached the DP optimum, in percent
    pub accuracy_pct: f64,
    pub execution_time: f64,
}

impl Experiment {
    /// Percentage of boards where the GA hit the exact optimum.
    pub fn accuracy_pct(outcomes: &[BoardOutcome]) -> f64 {
        if outcomes.is_empty() {
            return 0.0;
        }
        let correct = outcomes.iter().filter(|o| o.matched).count();
        correct as f64 / outcomes.len() as f64 * 100.0
    }

    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Experiment, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let experiment: Experiment = serde_json::from_str(&content)?;
        Ok(experiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;

    fn sample_outcome(matched: bool) -> BoardOutcome {
        let board = Board::new(vec![1, 2, 3, 4]);
        let exact = crate::dp::solve(&board);
        let best = Chromosome {
            genes: if matched {
                vec![1, 1, 0, 1]
            } else {
                vec![1, 1, 1, 1]
            },
            cost: if matched { 7 } else { 10 },
            fitness: 0.0,
            epoch: 1,
        };
        let path = best.path();
        let answer = GaAnswer {
            best_id: 0,
            best,
            path,
            generations: 12,
            trace: vec![],
        };
        BoardOutcome::new(board, &exact, &answer)
    }

    #[test]
    fn test_outcome_detects_optimum_match() {
        assert!(sample_outcome(true).matched);
        assert!(!sample_outcome(false).matched);
    }

    #[test]
    fn test_accuracy_pct() {
        let outcomes = vec![
            sample_outcome(true),
            sample_outcome(true),
            sample_outcome(false),
            sample_outcome(true),
        ];
        assert_eq!(Experiment::accuracy_pct(&outcomes), 75.0);
        assert_eq!(Experiment::accuracy_pct(&[]), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let experiment = Experiment {
            id: "boards_ga_test".to_string(),
            jumpga_version: "0.3.0#abc1234".to_string(),
            timestamp: "2026-01-01_00-00-00".to_string(),
            parameters: Param::default(),
            outcomes: vec![sample_outcome(true)],
            accuracy_pct: 100.0,
            execution_time: 0.5,
        };

        let path = std::env::temp_dir().join("jumpga_test_experiment.json");
        experiment.save_json(&path).unwrap();
        let loaded = Experiment::load_json(&path).unwrap();
        assert_eq!(experiment, loaded);

        let _ = std::fs::remove_file(path);
    }
}
