use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::train::{TrainMode, DEFAULT_LEARNING_RATE, DEFAULT_REPORT_EVERY};

/// Which training runs the binary performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Sequential,
    Parallel,
    /// Trains one copy per mode from identical initial weights and reports both.
    Compare,
}

impl RunMode {
    /// Training modes to run, in order. The first one produces the kept model.
    pub fn train_modes(self) -> &'static [TrainMode] {
        match self {
            RunMode::Sequential => &[TrainMode::Sequential],
            RunMode::Parallel => &[TrainMode::Parallel],
            RunMode::Compare => &[TrainMode::Sequential, TrainMode::Parallel],
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Sequential => f.pad("sequential"),
            RunMode::Parallel => f.pad("parallel"),
            RunMode::Compare => f.pad("compare"),
        }
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(RunMode::Sequential),
            "parallel" => Ok(RunMode::Parallel),
            "compare" => Ok(RunMode::Compare),
            other => Err(format!("unknown run mode '{other}'")),
        }
    }
}

/// Everything the binary needs for one run. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory every relative file name below is resolved against.
    pub data_dir: PathBuf,
    pub train_file: PathBuf,
    pub test_file: PathBuf,
    pub model_file: PathBuf,
    pub encoding_file: PathBuf,
    pub predictions_file: PathBuf,
    pub hidden_size: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub report_every: usize,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub mode: RunMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            data_dir: PathBuf::from("."),
            train_file: PathBuf::from("training_dataset.csv"),
            test_file: PathBuf::from("testing_dataset.csv"),
            model_file: PathBuf::from("trained_model.json"),
            encoding_file: PathBuf::from("feature_encoding.json"),
            predictions_file: PathBuf::from("predictions.csv"),
            hidden_size: 5,
            epochs: 100,
            learning_rate: DEFAULT_LEARNING_RATE,
            report_every: DEFAULT_REPORT_EVERY,
            seed: None,
            threads: None,
            mode: RunMode::Compare,
        }
    }
}

impl RunConfig {
    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Joins `file` onto `data_dir` unless it is already absolute.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn train_path(&self) -> PathBuf {
        self.resolve(&self.train_file)
    }

    pub fn test_path(&self) -> PathBuf {
        self.resolve(&self.test_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.model_file)
    }

    pub fn encoding_path(&self) -> PathBuf {
        self.resolve(&self.encoding_file)
    }

    pub fn predictions_path(&self) -> PathBuf {
        self.resolve(&self.predictions_file)
    }
}
