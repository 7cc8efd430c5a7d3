use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::eval::evaluator::PredictionResult;

pub const PREDICTIONS_HEADER: &str = "InputFeatures,PredictedValue,ActualValue,Error";

/// Writes predictions as CSV in the order given.
///
/// Features are joined with `|`; every number has 4 decimals.
pub fn write_predictions_csv<W: Write>(results: &[PredictionResult], mut writer: W) -> Result<()> {
    writeln!(writer, "{PREDICTIONS_HEADER}")?;

    for result in results {
        let features = result
            .input_features
            .iter()
            .map(|f| format!("{f:.4}"))
            .collect::<Vec<_>>()
            .join("|");
        writeln!(
            writer,
            "{},{:.4},{:.4},{:.4}",
            features, result.predicted_value, result.actual_value, result.error
        )?;
    }

    writer.flush()?;
    Ok(())
}

pub fn save_predictions_csv<P: AsRef<Path>>(results: &[PredictionResult], path: P) -> Result<()> {
    let file = File::create(path)?;
    write_predictions_csv(results, BufWriter::new(file))
}
