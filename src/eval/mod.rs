pub mod evaluator;
pub mod export;

pub use evaluator::{evaluate, evaluate_parallel, Evaluation, PredictionResult};
pub use export::{save_predictions_csv, write_predictions_csv, PREDICTIONS_HEADER};
