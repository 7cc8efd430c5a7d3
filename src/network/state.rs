use serde::{Deserialize, Serialize};

use crate::error::{NnError, Result};

/// Persisted form of a [`Network`](super::Network).
///
/// Field names match the JSON document written to disk:
/// `inputSize`, `hiddenSize`, `hiddenWeights` (hiddenSize rows of inputSize
/// reals) and `outputWeights` (hiddenSize reals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub input_size: usize,
    pub hidden_size: usize,
    pub hidden_weights: Vec<Vec<f64>>,
    pub output_weights: Vec<f64>,
}

impl NetworkState {
    /// Checks that the weight tensors agree with the declared sizes.
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 {
            return Err(NnError::CorruptModel(format!(
                "declared sizes must be positive, got inputSize={} hiddenSize={}",
                self.input_size, self.hidden_size
            )));
        }
        if self.hidden_weights.len() != self.hidden_size {
            return Err(NnError::CorruptModel(format!(
                "hiddenWeights has {} rows, hiddenSize is {}",
                self.hidden_weights.len(),
                self.hidden_size
            )));
        }
        if let Some((i, row)) = self
            .hidden_weights
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.input_size)
        {
            return Err(NnError::CorruptModel(format!(
                "hiddenWeights row {i} has {} columns, inputSize is {}",
                row.len(),
                self.input_size
            )));
        }
        if self.output_weights.len() != self.hidden_size {
            return Err(NnError::CorruptModel(format!(
                "outputWeights has {} entries, hiddenSize is {}",
                self.output_weights.len(),
                self.hidden_size
            )));
        }
        Ok(())
    }
}
