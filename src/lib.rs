pub mod board;
pub mod chromosome;
pub mod dp;
pub mod experiment;
pub mod ga;
pub mod param;
pub mod population;
pub mod utils;

use crate::experiment::{BoardOutcome, Experiment};
use chrono::Local;
use log::{debug, info, warn};
use param::Param;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::fmt;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Caller-visible failures of the solver. Everything else (invalid crossover
/// splits, mutation double zeros) is repaired internally and never surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum GaError {
    /// Board the encoding cannot score: too short or all-zero costs
    InvalidBoard(String),
    /// Unusable mating partition; indicates corrupted population state
    SelectionDegenerate(String),
}

impl fmt::Display for GaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaError::InvalidBoard(reason) => write!(f, "invalid board: {}", reason),
            GaError::SelectionDegenerate(reason) => {
                write!(f, "degenerate selection state: {}", reason)
            }
        }
    }
}

impl Error for GaError {}

/// Solve every board of the configured board file twice, once exactly by
/// dynamic programming and once by the genetic algorithm, and assemble the
/// run report with the GA accuracy against the exact optima.
pub fn run(param: &Param, running: Arc<AtomicBool>) -> Result<Experiment, Box<dyn Error>> {
    let start = std::time::Instant::now();
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();

    let boards = board::load_boards(&param.data.boards)?;
    info!(
        "Solving {} board(s) from {}",
        boards.len(),
        param.data.boards
    );

    // One sequential random stream for the whole run keeps fixed-seed runs
    // reproducible board after board
    let mut rng = ChaCha8Rng::seed_from_u64(param.general.seed);

    let mut outcomes: Vec<BoardOutcome> = Vec::with_capacity(boards.len());
    for (index, board) in boards.into_iter().enumerate() {
        if !running.load(Ordering::Relaxed) {
            warn!("Interrupted before board {}", index + 1);
            break;
        }

        board.validate().map_err(|e| format!("board {}: {}", index + 1, e))?;
        let exact = dp::solve(&board);
        let answer = ga::ga_with_rng(&board, param, running.clone(), &mut rng)?;

        debug!(
            "board {}: DP {} vs GA {} in {} generations",
            index + 1,
            exact.cost,
            answer.best.cost,
            answer.generations
        );
        outcomes.push(BoardOutcome::new(board, &exact, &answer));
    }

    let accuracy_pct = Experiment::accuracy_pct(&outcomes);
    let jumpga_version = format!(
        "{}#{}",
        env!("CARGO_PKG_VERSION"),
        option_env!("JUMPGA_GIT_SHA").unwrap_or("unknown")
    );
    let execution_time = start.elapsed().as_secs_f64();

    let prefix = param
        .general
        .save_exp
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("run");

    Ok(Experiment {
        id: format!("{}_ga_{}", prefix, timestamp),
        jumpga_version,
        timestamp,
        parameters: param.clone(),
        outcomes,
        accuracy_pct,
        execution_time,
    })
}
