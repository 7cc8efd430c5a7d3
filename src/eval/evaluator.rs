use rayon::prelude::*;

use crate::data::TrainingSample;
use crate::error::{NnError, Result};
use crate::network::Network;

/// One inference on a held-out sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub input_features: Vec<f64>,
    pub predicted_value: f64,
    pub actual_value: f64,
    /// Squared error of the prediction.
    pub error: f64,
}

/// Aggregate test error plus per-sample predictions in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub mean_squared_error: f64,
    pub results: Vec<PredictionResult>,
}

/// Runs inference over `samples` without touching the weights.
pub fn evaluate(network: &Network, samples: &[TrainingSample]) -> Result<Evaluation> {
    if samples.is_empty() {
        return Err(NnError::EmptyDataset("evaluation samples"));
    }

    let results = samples
        .iter()
        .map(|sample| predict(network, sample))
        .collect::<Result<Vec<_>>>()?;

    Ok(summarize(results))
}

/// Same as [`evaluate`], one rayon task per sample; result order is preserved.
pub fn evaluate_parallel(network: &Network, samples: &[TrainingSample]) -> Result<Evaluation> {
    if samples.is_empty() {
        return Err(NnError::EmptyDataset("evaluation samples"));
    }

    let results = samples
        .par_iter()
        .map(|sample| predict(network, sample))
        .collect::<Result<Vec<_>>>()?;

    Ok(summarize(results))
}

fn predict(network: &Network, sample: &TrainingSample) -> Result<PredictionResult> {
    let predicted_value = network.forward(&sample.features)?;
    let diff = predicted_value - sample.target;

    Ok(PredictionResult {
        input_features: sample.features.clone(),
        predicted_value,
        actual_value: sample.target,
        error: diff * diff,
    })
}

fn summarize(results: Vec<PredictionResult>) -> Evaluation {
    let total: f64 = results.iter().map(|r| r.error).sum();
    Evaluation {
        mean_squared_error: total / results.len() as f64,
        results,
    }
}
