pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use config::{RunConfig, RunMode};
pub use data::{FeatureEncoding, Record, TrainingSample};
pub use error::{NnError, Result};
pub use eval::{evaluate, Evaluation, PredictionResult};
pub use math::matrix::Matrix;
pub use network::{Network, NetworkState};
pub use train::{train, train_loop, TrainConfig, TrainMode};
