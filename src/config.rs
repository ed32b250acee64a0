use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data/hero_matchups.json";
pub const DEFAULT_MEMO_CAPACITY: usize = 65_536;

/// Coefficients of the scoring formulas.
///
/// - `adv_k`: sensitivity of the logistic win-probability transform
/// - `synergy_k`: weight applied to summed ally synergy
/// - `winrate_k`: weight applied to `solo_winrate - 50`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub adv_k: f64,
    pub synergy_k: f64,
    pub winrate_k: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            adv_k: 0.12,
            synergy_k: 0.5,
            winrate_k: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub weights: ScoringWeights,
    pub memo_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_path = env::var("HERO_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            adv_k: float_var("HERO_ADV_K", defaults.adv_k)?,
            synergy_k: float_var("HERO_SYNERGY_K", defaults.synergy_k)?,
            winrate_k: float_var("HERO_WINRATE_K", defaults.winrate_k)?,
        };

        let memo_capacity = match env::var("HERO_MEMO_CAPACITY") {
            Ok(value) => parse_capacity("HERO_MEMO_CAPACITY", &value)?,
            Err(_) => DEFAULT_MEMO_CAPACITY,
        };

        Ok(Config {
            data_path,
            weights,
            memo_capacity,
        })
    }
}

/// `data/hero_matchups.json` in the working directory, or the copy under the
/// home directory when the local one does not exist.
pub fn default_data_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_DATA_FILE);
    if local.exists() {
        return local;
    }

    let home = dirs::home_dir()
        .map(|home| home.join(".hero_draft").join("hero_matchups.json"));

    match home {
        Some(path) if path.exists() => path,
        _ => local,
    }
}

fn float_var(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(value) => parse_float(var, &value),
        Err(_) => Ok(default),
    }
}

fn parse_float(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

fn parse_capacity(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ConfigError::InvalidCapacity {
            var,
            value: value.to_string(),
        })
}
