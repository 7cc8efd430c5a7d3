use crate::activation::sigmoid;

/// Element-wise access to the two weight tensors of a single-hidden-layer network.
///
/// The sequential trainer mutates an owned [`Network`](super::Network) through
/// this trait; the parallel trainer mutates a shared, unsynchronized buffer
/// through `&SharedWeights`. Both therefore run the exact same update code.
pub trait WeightStore {
    fn input_size(&self) -> usize;
    fn hidden_size(&self) -> usize;

    /// Weight from input feature `feature` into hidden unit `unit`.
    fn hidden_weight(&self, unit: usize, feature: usize) -> f64;
    fn set_hidden_weight(&mut self, unit: usize, feature: usize, value: f64);

    /// Weight from hidden unit `unit` into the single output.
    fn output_weight(&self, unit: usize) -> f64;
    fn set_output_weight(&mut self, unit: usize, value: f64);
}

/// Post-activation outputs of one forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    pub hidden: Vec<f64>,
    pub output: f64,
}

/// Forward pass through any weight store, keeping the hidden activations for backprop.
///
/// `input` must already have been checked against `weights.input_size()`.
pub fn feed_forward<W: WeightStore + ?Sized>(weights: &W, input: &[f64]) -> Activations {
    let hidden: Vec<f64> = (0..weights.hidden_size())
        .map(|unit| {
            let z: f64 = input
                .iter()
                .enumerate()
                .map(|(j, x)| x * weights.hidden_weight(unit, j))
                .sum();
            sigmoid(z)
        })
        .collect();

    let z: f64 = hidden
        .iter()
        .enumerate()
        .map(|(i, h)| h * weights.output_weight(i))
        .sum();

    Activations {
        hidden,
        output: sigmoid(z),
    }
}
