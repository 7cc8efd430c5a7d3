use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::activation::sigmoid;
use crate::error::{NnError, Result};
use crate::math::{dot, Matrix};
use crate::network::state::NetworkState;
use crate::network::weights::{feed_forward, Activations, WeightStore};

/// Single-hidden-layer feed-forward network with sigmoid activations and no biases.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    input_size: usize,
    hidden_size: usize,
    /// `hidden_size` rows of `input_size` weights.
    hidden_weights: Matrix,
    output_weights: Vec<f64>,
}

impl Network {
    /// Creates a network with weights drawn from the thread-local RNG.
    pub fn new(input_size: usize, hidden_size: usize) -> Result<Network> {
        Network::with_rng(input_size, hidden_size, &mut rand::thread_rng())
    }

    /// Creates a network whose initial weights are fully determined by `seed`.
    pub fn with_seed(input_size: usize, hidden_size: usize, seed: u64) -> Result<Network> {
        Network::with_rng(input_size, hidden_size, &mut StdRng::seed_from_u64(seed))
    }

    /// Creates a network with every weight drawn independently from U[-1, 1].
    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        rng: &mut R,
    ) -> Result<Network> {
        if input_size == 0 || hidden_size == 0 {
            return Err(NnError::InvalidConfiguration(format!(
                "input size and hidden size must be positive, got {input_size} and {hidden_size}"
            )));
        }

        let hidden_weights = Matrix::random(hidden_size, input_size, rng);
        let output_weights = Matrix::random(hidden_size, 1, rng)
            .data
            .into_iter()
            .flatten()
            .collect();
        debug!("initialized network: input_size={input_size} hidden_size={hidden_size}");

        Ok(Network {
            input_size,
            hidden_size,
            hidden_weights,
            output_weights,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden_weights
    }

    pub fn output_weights(&self) -> &[f64] {
        &self.output_weights
    }

    /// Predicts a single value in (0, 1).
    pub fn forward(&self, input: &[f64]) -> Result<f64> {
        Ok(self.activations(input)?.output)
    }

    /// Same result as [`forward`](Self::forward), with one rayon task per hidden unit.
    pub fn forward_parallel(&self, input: &[f64]) -> Result<f64> {
        self.check_input(input)?;

        let hidden: Vec<f64> = (0..self.hidden_size)
            .into_par_iter()
            .map(|unit| sigmoid(dot(input, self.hidden_weights.row(unit))))
            .collect();

        Ok(sigmoid(dot(&hidden, &self.output_weights)))
    }

    /// Forward pass that also returns the hidden-layer activations.
    pub fn activations(&self, input: &[f64]) -> Result<Activations> {
        self.check_input(input)?;
        Ok(feed_forward(self, input))
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size {
            return Err(NnError::mismatch(
                "network input",
                input.len(),
                self.input_size,
            ));
        }
        Ok(())
    }

    /// Snapshot of the sizes and weights, suitable for persistence.
    pub fn export_state(&self) -> NetworkState {
        NetworkState {
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            hidden_weights: self.hidden_weights.to_rows(),
            output_weights: self.output_weights.clone(),
        }
    }

    /// Rebuilds a network from a snapshot without re-randomizing anything.
    pub fn import_state(state: NetworkState) -> Result<Network> {
        state.validate()?;

        let NetworkState {
            input_size,
            hidden_size,
            hidden_weights,
            output_weights,
        } = state;

        let hidden_weights = Matrix::from_rows(hidden_weights, input_size).ok_or_else(|| {
            NnError::CorruptModel("hidden weight rows do not match inputSize".into())
        })?;

        Ok(Network {
            input_size,
            hidden_size,
            hidden_weights,
            output_weights,
        })
    }

    /// Serializes the network state as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.export_state())?;
        Ok(())
    }

    /// Reads a network previously written by [`write_json`](Self::write_json).
    pub fn read_json<R: Read>(reader: R) -> Result<Network> {
        let state: NetworkState = serde_json::from_reader(reader)?;
        Network::import_state(state)
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path)?;
        Network::read_json(BufReader::new(file))
    }
}

impl WeightStore for Network {
    fn input_size(&self) -> usize {
        self.input_size
    }

    fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    fn hidden_weight(&self, unit: usize, feature: usize) -> f64 {
        self.hidden_weights.get(unit, feature)
    }

    fn set_hidden_weight(&mut self, unit: usize, feature: usize, value: f64) {
        self.hidden_weights.set(unit, feature, value);
    }

    fn output_weight(&self, unit: usize) -> f64 {
        self.output_weights[unit]
    }

    fn set_output_weight(&mut self, unit: usize, value: f64) {
        self.output_weights[unit] = value;
    }
}
