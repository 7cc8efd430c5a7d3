/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value on every reporting epoch. Observation
/// has no effect on training.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStats {
    /// 0-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean squared error over all samples in this epoch.
    pub train_loss: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
