use crate::analysis::density::check_bins;
use crate::analysis::summary::DEFAULT_TOP_SCORERS;
use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_CSV: &str = "all_shots_16_20.csv";
const DEFAULT_BINS: usize = 45;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub top_n: usize,
    pub heatmap_bins: usize,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_path = env::var("SHOTS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV));

        let top_n = parse_usize(
            "SHOTS_TOP_N",
            env::var("SHOTS_TOP_N").ok(),
            DEFAULT_TOP_SCORERS,
        )?;

        let heatmap_bins = parse_bins(env::var("SHOTS_HEATMAP_BINS").ok())?;

        let output_dir = env::var("SHOTS_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_output_dir());

        Ok(Config {
            data_path,
            top_n,
            heatmap_bins,
            output_dir,
        })
    }
}

pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".shot_dash")
}

fn parse_bins(raw: Option<String>) -> Result<usize, AppError> {
    let bins = parse_usize("SHOTS_HEATMAP_BINS", raw, DEFAULT_BINS)?;
    check_bins(bins).map_err(|e| AppError::ConfigError(format!("SHOTS_HEATMAP_BINS: {}", e)))
}

fn parse_usize(key: &str, raw: Option<String>, default: usize) -> Result<usize, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse::<usize>().map_err(|_| {
            AppError::ConfigError(format!("{} must be a positive integer, got '{}'", key, value))
        }),
    }
}
