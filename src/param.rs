use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

// Field definitions and associated default values

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Param {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ga: GA,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct General {
    #[serde(default = "seed_default")]
    pub seed: u64,
    #[serde(default = "one_default")]
    pub thread_number: usize,
    #[serde(default = "log_base_default")]
    pub log_base: String,
    #[serde(default = "log_suffix_default")]
    pub log_suffix: String,
    #[serde(default = "log_level_default")]
    pub log_level: String,
    #[serde(default = "false_default")]
    pub keep_trace: bool,
    #[serde(default = "save_experiment_default")]
    pub save_exp: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Data {
    #[serde(default = "boards_default")]
    pub boards: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GA {
    /// Population size as a multiple of the board length
    #[serde(default = "population_factor_default")]
    pub population_factor: usize,
    #[serde(default = "cross_rate_default")]
    pub cross_rate: f64,
    #[serde(default = "mutation_rate_default")]
    pub mutation_rate: f64,
    /// Stop after this many stagnant generations per population unit
    #[serde(default = "stagnation_factor_default")]
    pub stagnation_factor: f64,
    /// Hard generation cap as a multiple of the population size
    #[serde(default = "max_generations_factor_default")]
    pub max_generations_factor: usize,
}

impl Default for Param {
    fn default() -> Self {
        Param {
            general: General::default(),
            data: Data::default(),
            ga: GA::default(),
        }
    }
}

impl Default for General {
    fn default() -> Self {
        General {
            seed: seed_default(),
            thread_number: one_default(),
            log_base: log_base_default(),
            log_suffix: log_suffix_default(),
            log_level: log_level_default(),
            keep_trace: false_default(),
            save_exp: save_experiment_default(),
        }
    }
}

impl Default for Data {
    fn default() -> Self {
        Data {
            boards: boards_default(),
        }
    }
}

impl Default for GA {
    fn default() -> Self {
        GA {
            population_factor: population_factor_default(),
            cross_rate: cross_rate_default(),
            mutation_rate: mutation_rate_default(),
            stagnation_factor: stagnation_factor_default(),
            max_generations_factor: max_generations_factor_default(),
        }
    }
}

pub fn get(param_file: String) -> Result<Param, Box<dyn Error>> {
    let param_file_reader = File::open(param_file)?;
    let param_reader = BufReader::new(param_file_reader);

    let mut config: Param = serde_yaml::from_reader(param_reader)?;

    let _ = validate(&mut config)?;

    Ok(config)
}

pub fn validate(param: &mut Param) -> Result<(), String> {
    if !(0.0..=1.0).contains(&param.ga.cross_rate) {
        return Err(format!(
            "Invalid cross_rate={:.3}. Must be in range [0, 1].",
            param.ga.cross_rate
        ));
    }

    if !(0.0..=1.0).contains(&param.ga.mutation_rate) {
        return Err(format!(
            "Invalid mutation_rate={:.3}. Must be in range [0, 1].",
            param.ga.mutation_rate
        ));
    }

    if param.ga.population_factor == 0 {
        return Err("Invalid population_factor=0. Must be >= 1.".to_string());
    }

    if param.ga.stagnation_factor <= 0.0 {
        return Err(format!(
            "Invalid stagnation_factor={:.3}. Must be > 0.",
            param.ga.stagnation_factor
        ));
    }

    if param.ga.max_generations_factor == 0 {
        return Err("Invalid max_generations_factor=0. Must be >= 1.".to_string());
    }

    if param.general.thread_number == 0 {
        warn!("thread_number=0: letting rayon decide the pool size.");
    }

    Ok(())
}

// Default value definitions

fn seed_default() -> u64 {
    999
}
fn one_default() -> usize {
    1
}
fn log_base_default() -> String {
    "".to_string()
}
fn log_suffix_default() -> String {
    "log".to_string()
}
fn log_level_default() -> String {
    "info".to_string()
}
fn false_default() -> bool {
    false
}
fn save_experiment_default() -> String {
    "".to_string()
}
fn boards_default() -> String {
    "samples/boards.txt".to_string()
}
fn population_factor_default() -> usize {
    3
}
fn cross_rate_default() -> f64 {
    0.85
}
fn mutation_rate_default() -> f64 {
    0.01
}
fn stagnation_factor_default() -> f64 {
    7.5
}
fn max_generations_factor_default() -> usize {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_param_matches_reference_constants() {
        let param = Param::default();
        assert_eq!(param.general.seed, 999);
        assert_eq!(param.ga.population_factor, 3);
        assert_eq!(param.ga.cross_rate, 0.85);
        assert_eq!(param.ga.mutation_rate, 0.01);
        assert_eq!(param.ga.stagnation_factor, 7.5);
        assert_eq!(param.ga.max_generations_factor, 15);
    }

    #[test]
    fn test_validate_accepts_default() {
        let mut param = Param::default();
        assert!(validate(&mut param).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut param = Param::default();
        param.ga.cross_rate = 1.5;
        assert!(validate(&mut param).is_err());

        let mut param = Param::default();
        param.ga.mutation_rate = -0.1;
        assert!(validate(&mut param).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_factors() {
        let mut param = Param::default();
        param.ga.population_factor = 0;
        assert!(validate(&mut param).is_err());

        let mut param = Param::default();
        param.ga.max_generations_factor = 0;
        assert!(validate(&mut param).is_err());

        let mut param = Param::default();
        param.ga.stagnation_factor = 0.0;
        assert!(validate(&mut param).is_err());
    }

    #[test]
    fn test_yaml_partial_file_uses_defaults() {
        let yaml = "general:\n  seed: 42\nga:\n  population_factor: 5\n";
        let param: Param = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(param.general.seed, 42);
        assert_eq!(param.ga.population_factor, 5);
        assert_eq!(param.ga.cross_rate, 0.85);
        assert_eq!(param.data.boards, "samples/boards.txt");
    }
}
