use std::{env, fs, num::NonZeroUsize, path::PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{error::Result, factory::Architecture, preprocess::ScalerFit};

const DEFAULT_DATASET_PATH: &str = "data/network_traffic.csv";
const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(50).unwrap();
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(32).unwrap();

/// Environment variable naming a JSON file with configuration overrides.
pub const CONFIG_VAR: &str = "DETECTION_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATASET_VAR: &str = "DATASET_PATH";

/// Everything that parameterizes a run of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub dataset_path: PathBuf,
    pub epochs: NonZeroUsize,
    pub batch_size: NonZeroUsize,
    pub test_fraction: f32,
    pub seed: u64,
    pub synthetic_rows: usize,
    pub architecture: Architecture,
    pub scaler_fit: ScalerFit,
    pub plot: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            epochs: DEFAULT_EPOCHS,
            batch_size: DEFAULT_BATCH_SIZE,
            test_fraction: 0.2,
            seed: 42,
            synthetic_rows: 1000,
            architecture: Architecture::Shallow,
            scaler_fit: ScalerFit::FullDataset,
            plot: true,
        }
    }
}

impl PipelineConfig {
    /// Builds the configuration from the defaults, the JSON file named by `DETECTION_CONFIG`
    /// and the `DATASET_PATH` override, in that order.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var(CONFIG_VAR) {
            Ok(path) => {
                info!("reading configuration from {path}");
                Self::from_json(&fs::read_to_string(path)?)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(path) = env::var(DATASET_VAR) {
            config.dataset_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Parses a JSON object, any missing field keeps its default.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
