use std::fmt;
use std::str::FromStr;
use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Default learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
/// Progress is reported on every epoch divisible by this.
pub const DEFAULT_REPORT_EVERY: usize = 10;

/// How the samples of one epoch are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainMode {
    /// Online SGD: each sample sees the weights left by the previous one.
    Sequential,
    /// Racy parallel SGD: all samples of an epoch update one shared weight
    /// buffer concurrently with no per-weight synchronization. Results are
    /// not deterministic and will not match `Sequential`.
    Parallel,
}

impl fmt::Display for TrainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainMode::Sequential => f.pad("sequential"),
            TrainMode::Parallel => f.pad("parallel"),
        }
    }
}

impl FromStr for TrainMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(TrainMode::Sequential),
            "parallel" => Ok(TrainMode::Parallel),
            other => Err(format!("unknown training mode '{other}'")),
        }
    }
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        - total number of full passes over the training data
/// - `learning_rate` - SGD step size
/// - `mode`          - sequential or racy-parallel sample scheduling
/// - `report_every`  - log and emit `EpochStats` when `epoch % report_every == 0`
/// - `threads`       - rayon worker count for parallel mode; `None` uses the
///                     global pool
/// - `progress_tx`   - optional channel sender for `EpochStats`. A dropped
///                     receiver is ignored.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub mode: TrainMode,
    pub report_every: usize,
    pub threads: Option<usize>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default report interval and no progress channel.
    pub fn new(epochs: usize, learning_rate: f64, mode: TrainMode) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            mode,
            report_every: DEFAULT_REPORT_EVERY,
            threads: None,
            progress_tx: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub(crate) fn reports(&self, epoch: usize) -> bool {
        self.report_every > 0 && epoch % self.report_every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Parallel".parse::<TrainMode>(), Ok(TrainMode::Parallel));
        assert_eq!("sequential".parse::<TrainMode>(), Ok(TrainMode::Sequential));
        assert!("batched".parse::<TrainMode>().is_err());
    }

    #[test]
    fn reports_every_tenth_epoch_by_default() {
        let config = TrainConfig::new(100, 0.01, TrainMode::Sequential);
        let reported: Vec<usize> = (0..35).filter(|&e| config.reports(e)).collect();
        assert_eq!(reported, vec![0, 10, 20, 30]);
    }

    #[test]
    fn zero_interval_never_reports() {
        let mut config = TrainConfig::new(5, 0.01, TrainMode::Sequential);
        config.report_every = 0;
        assert!((0..5).all(|e| !config.reports(e)));
    }
}
