pub mod epoch_stats;
pub mod loop_fn;
pub mod shared;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::EpochStats;
pub use loop_fn::{progress_line, train, train_default, train_loop};
pub use shared::SharedWeights;
pub use train_config::{TrainConfig, TrainMode, DEFAULT_LEARNING_RATE, DEFAULT_REPORT_EVERY};
pub use trainer::{run_epoch, train_sample};
