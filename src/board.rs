use crate::GaError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// A JumpIt game board: one non-negative cost per cell, fixed for the whole run
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub costs: Vec<u64>,
}

impl Board {
    pub fn new(costs: Vec<u64>) -> Board {
        Board { costs }
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Reject boards the encoding cannot represent: fewer than two cells
    /// (the fixed first/last genes need distinct cells) or all-zero costs
    /// (fitness = 1/cost would be undefined for every chromosome).
    pub fn validate(&self) -> Result<(), GaError> {
        if self.costs.len() < 2 {
            return Err(GaError::InvalidBoard(format!(
                "board has {} cell(s), need at least 2",
                self.costs.len()
            )));
        }
        if self.costs.iter().all(|&c| c == 0) {
            return Err(GaError::InvalidBoard(
                "board costs are all zero, fitness is undefined".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board[{}] {:?}", self.costs.len(), self.costs)
    }
}

/// Load game boards from a text file, one board per line as
/// whitespace-separated non-negative integers. Blank lines are skipped.
/// Boards are only parsed here; validation happens per run.
pub fn load_boards(path: &str) -> Result<Vec<Board>, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut boards: Vec<Board> = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let costs = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u64>().map_err(|e| {
                    format!(
                        "bad cell cost {:?} on line {}: {}",
                        token,
                        line_number + 1,
                        e
                    )
                })
            })
            .collect::<Result<Vec<u64>, String>>()?;
        boards.push(Board::new(costs));
    }

    debug!("Loaded {} board(s) from {}", boards.len(), path);
    Ok(boards)
}
