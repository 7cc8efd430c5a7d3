use std::sync::atomic::{AtomicU64, Ordering};

use crate::network::{Network, WeightStore};

/// Weight buffer shared by every sample of a parallel epoch, without locks.
///
/// It embraces race conditions: each weight is an `f64` stored as bits in a
/// relaxed `AtomicU64`, and every update is a plain load, compute, store. Two
/// samples touching the same weight may read stale values and overwrite each
/// other's update. The atomics only make those races memory-safe; they do not
/// serialize anything.
pub struct SharedWeights {
    input_size: usize,
    hidden_size: usize,
    /// Row-major, `hidden_size * input_size`.
    hidden: Box<[AtomicU64]>,
    output: Box<[AtomicU64]>,
}

impl SharedWeights {
    /// Copies the current weights of `network` into a shared buffer.
    pub fn from_network(network: &Network) -> Self {
        let hidden = network
            .hidden_weights()
            .data
            .iter()
            .flatten()
            .map(|w| AtomicU64::new(w.to_bits()))
            .collect();
        let output = network
            .output_weights()
            .iter()
            .map(|w| AtomicU64::new(w.to_bits()))
            .collect();

        Self {
            input_size: network.input_size(),
            hidden_size: network.hidden_size(),
            hidden,
            output,
        }
    }

    /// Copies the buffer back into `network`. Sizes must match the source network.
    pub fn write_back(&self, network: &mut Network) {
        for unit in 0..self.hidden_size {
            for feature in 0..self.input_size {
                network.set_hidden_weight(unit, feature, self.hidden(unit, feature));
            }
            network.set_output_weight(unit, self.output(unit));
        }
    }

    pub fn hidden(&self, unit: usize, feature: usize) -> f64 {
        f64::from_bits(self.hidden[unit * self.input_size + feature].load(Ordering::Relaxed))
    }

    pub fn output(&self, unit: usize) -> f64 {
        f64::from_bits(self.output[unit].load(Ordering::Relaxed))
    }

    /// Unsynchronized store; a concurrent store to the same weight may win instead.
    pub fn store_hidden(&self, unit: usize, feature: usize, value: f64) {
        self.hidden[unit * self.input_size + feature].store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn store_output(&self, unit: usize, value: f64) {
        self.output[unit].store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Each rayon task holds its own `&SharedWeights` and writes through it.
impl WeightStore for &SharedWeights {
    fn input_size(&self) -> usize {
        self.input_size
    }

    fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    fn hidden_weight(&self, unit: usize, feature: usize) -> f64 {
        self.hidden(unit, feature)
    }

    fn set_hidden_weight(&mut self, unit: usize, feature: usize, value: f64) {
        self.store_hidden(unit, feature, value);
    }

    fn output_weight(&self, unit: usize) -> f64 {
        self.output(unit)
    }

    fn set_output_weight(&mut self, unit: usize, value: f64) {
        self.store_output(unit, value);
    }
}
