use std::time::Instant;

use log::{debug, info};

use crate::data::TrainingSample;
use crate::error::{NnError, Result};
use crate::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::{TrainConfig, TrainMode, DEFAULT_LEARNING_RATE};
use crate::train::trainer::run_epoch;

/// Trains `network` in place for `epochs` epochs with the default report interval.
///
/// Returns the mean squared error of the last epoch.
pub fn train(
    network: &mut Network,
    samples: &[TrainingSample],
    epochs: usize,
    mode: TrainMode,
    learning_rate: f64,
) -> Result<f64> {
    train_loop(
        network,
        samples,
        &TrainConfig::new(epochs, learning_rate, mode),
    )
}

/// Same as [`train`] with the default learning rate.
pub fn train_default(
    network: &mut Network,
    samples: &[TrainingSample],
    epochs: usize,
    mode: TrainMode,
) -> Result<f64> {
    train(network, samples, epochs, mode, DEFAULT_LEARNING_RATE)
}

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// error of the **last completed epoch** (0 when no epoch ran).
///
/// Every epoch is a barrier: in parallel mode all samples of an epoch finish
/// before the next epoch starts.
///
/// # Errors
/// - `EmptyDataset` if `samples` is empty
/// - `DimensionMismatch` if any sample's feature length differs from the
///   network's input size
/// - `InvalidConfiguration` if a dedicated thread pool cannot be built
pub fn train_loop(
    network: &mut Network,
    samples: &[TrainingSample],
    config: &TrainConfig,
) -> Result<f64> {
    if samples.is_empty() {
        return Err(NnError::EmptyDataset("training samples"));
    }
    for sample in samples {
        network.check_input(&sample.features)?;
    }

    debug!(
        "training: mode={} epochs={} learning_rate={} samples={}",
        config.mode,
        config.epochs,
        config.learning_rate,
        samples.len()
    );

    match (config.mode, config.threads) {
        (TrainMode::Parallel, Some(threads)) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| NnError::InvalidConfiguration(e.to_string()))?;
            Ok(pool.install(|| run_epochs(network, samples, config)))
        }
        _ => Ok(run_epochs(network, samples, config)),
    }
}

fn run_epochs(network: &mut Network, samples: &[TrainingSample], config: &TrainConfig) -> f64 {
    let mut last_train_loss = 0.0;

    for epoch in 0..config.epochs {
        let t_start = Instant::now();
        let train_loss = run_epoch(network, samples, config.learning_rate, config.mode);
        last_train_loss = train_loss;

        if config.reports(epoch) {
            info!("{}", progress_line(epoch, train_loss));

            if let Some(ref tx) = config.progress_tx {
                let stats = EpochStats {
                    epoch,
                    total_epochs: config.epochs,
                    train_loss,
                    elapsed_ms: t_start.elapsed().as_millis() as u64,
                };
                // A gone receiver only stops observation, never training.
                let _ = tx.send(stats);
            }
        }
    }

    last_train_loss
}

/// The periodic progress line, e.g. `Epoch 10, Error: 0.0125`.
pub fn progress_line(epoch: usize, mean_squared_error: f64) -> String {
    format!("Epoch {epoch}, Error: {mean_squared_error}")
}
