use parking_lot::Mutex;
use rayon::prelude::*;

use crate::activation::sigmoid_prime_from_output;
use crate::data::TrainingSample;
use crate::network::{feed_forward, Network, WeightStore};
use crate::train::shared::SharedWeights;
use crate::train::train_config::TrainMode;

/// One stochastic gradient-descent step on a single sample.
///
/// The output weights are updated first and the hidden error is then computed
/// from the *updated* output weights. Returns the squared error of the
/// prediction made before the update.
///
/// `sample.features` must already have been checked against `weights.input_size()`.
pub fn train_sample<W: WeightStore + ?Sized>(
    weights: &mut W,
    sample: &TrainingSample,
    learning_rate: f64,
) -> f64 {
    let input = &sample.features;
    let activations = feed_forward(&*weights, input);
    let hidden = &activations.hidden;
    let output = activations.output;

    let output_error = output - sample.target;
    let output_gradient = output_error * sigmoid_prime_from_output(output);

    for (unit, h) in hidden.iter().enumerate() {
        let w = weights.output_weight(unit);
        weights.set_output_weight(unit, w - learning_rate * output_gradient * h);
    }

    let hidden_errors: Vec<f64> = hidden
        .iter()
        .enumerate()
        .map(|(unit, h)| {
            output_gradient * weights.output_weight(unit) * sigmoid_prime_from_output(*h)
        })
        .collect();

    for (unit, hidden_error) in hidden_errors.iter().enumerate() {
        for (feature, x) in input.iter().enumerate() {
            let w = weights.hidden_weight(unit, feature);
            weights.set_hidden_weight(unit, feature, w - learning_rate * hidden_error * x);
        }
    }

    output_error * output_error
}

/// Runs one full pass over `samples` and returns the mean squared error of the epoch.
///
/// Samples are visited in order with no shuffling. In parallel mode every
/// sample is handed to rayon at once and all tasks share one unsynchronized
/// weight buffer; only the error total is locked. The call returns after
/// every sample finished, with the buffer written back into `network`.
///
/// `samples` must be non-empty and dimension-checked by the caller.
pub fn run_epoch(
    network: &mut Network,
    samples: &[TrainingSample],
    learning_rate: f64,
    mode: TrainMode,
) -> f64 {
    let total = match mode {
        TrainMode::Sequential => samples
            .iter()
            .map(|sample| train_sample(&mut *network, sample, learning_rate))
            .sum::<f64>(),
        TrainMode::Parallel => {
            let shared = SharedWeights::from_network(network);
            let total_error = Mutex::new(0.0);

            samples.par_iter().for_each(|sample| {
                let mut weights = &shared;
                let error = train_sample(&mut weights, sample, learning_rate);
                *total_error.lock() += error;
            });

            shared.write_back(network);
            total_error.into_inner()
        }
    };

    total / samples.len() as f64
}
