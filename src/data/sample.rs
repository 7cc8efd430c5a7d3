use crate::error::{NnError, Result};

/// One encoded feature vector paired with its normalized target.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub features: Vec<f64>,
    pub target: f64,
}

impl TrainingSample {
    pub fn new(features: Vec<f64>, target: f64) -> Self {
        TrainingSample { features, target }
    }

    /// Pairs parallel input and target arrays.
    pub fn zip(inputs: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Vec<TrainingSample>> {
        if inputs.len() != targets.len() {
            return Err(NnError::mismatch("targets", targets.len(), inputs.len()));
        }
        Ok(inputs
            .into_iter()
            .zip(targets)
            .map(|(features, target)| TrainingSample { features, target })
            .collect())
    }
}
