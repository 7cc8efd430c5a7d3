use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::record::Record;
use crate::data::sample::TrainingSample;
use crate::error::{NnError, Result};

/// Number of position labels that get a one-hot slot.
pub const TOP_POSITIONS: usize = 10;

/// Vocabulary and salary bounds derived once from the training set.
///
/// The same encoding must be applied to every dataset evaluated against a
/// model trained with it; it is persisted next to the model for that reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEncoding {
    /// Most frequent positions, most frequent first.
    pub positions: Vec<String>,
    pub min_salary: f64,
    pub max_salary: f64,
}

impl FeatureEncoding {
    /// Derives the vocabulary and bounds from `records`.
    ///
    /// Positions are ranked by count; equal counts keep first-appearance order.
    pub fn fit(records: &[Record]) -> Result<FeatureEncoding> {
        if records.is_empty() {
            return Err(NnError::EmptyDataset("training records"));
        }

        // (count, first index) per position
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            counts.entry(record.position.as_str()).or_insert((0, idx)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(position, (count, first))| (position, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let positions: Vec<String> = ranked
            .into_iter()
            .take(TOP_POSITIONS)
            .map(|(position, _, _)| position.to_string())
            .collect();

        let min_salary = records.iter().map(|r| r.salary).fold(f64::INFINITY, f64::min);
        let max_salary = records
            .iter()
            .map(|r| r.salary)
            .fold(f64::NEG_INFINITY, f64::max);

        debug!(
            "fitted encoding: {} positions, salary range [{min_salary}, {max_salary}]",
            positions.len()
        );

        Ok(FeatureEncoding {
            positions,
            min_salary,
            max_salary,
        })
    }

    /// Length of every encoded feature vector: gender plus one slot per position.
    pub fn input_size(&self) -> usize {
        1 + self.positions.len()
    }

    /// Min-max scales a salary using the fitted bounds.
    ///
    /// A degenerate range (all salaries equal) maps everything to 0.
    pub fn normalize(&self, salary: f64) -> f64 {
        let range = self.max_salary - self.min_salary;
        if range == 0.0 {
            return 0.0;
        }
        (salary - self.min_salary) / range
    }

    /// Maps a normalized prediction back to a salary.
    pub fn denormalize(&self, value: f64) -> f64 {
        self.min_salary + value * (self.max_salary - self.min_salary)
    }

    /// `[gender, one-hot(position)]`; unknown positions leave every slot at 0.
    pub fn features(&self, record: &Record) -> Vec<f64> {
        let mut encoded = Vec::with_capacity(self.input_size());
        encoded.push(f64::from(record.gender));
        encoded.extend(
            self.positions
                .iter()
                .map(|p| if *p == record.position { 1.0 } else { 0.0 }),
        );
        encoded
    }

    pub fn encode(&self, record: &Record) -> TrainingSample {
        TrainingSample::new(self.features(record), self.normalize(record.salary))
    }

    pub fn encode_all(&self, records: &[Record]) -> Vec<TrainingSample> {
        records.iter().map(|r| self.encode(r)).collect()
    }

    /// Writes the encoding as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<FeatureEncoding> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("Dev", 0, 90000.0),
            Record::new("Dev", 1, 100000.0),
            Record::new("QA", 0, 50000.0),
        ]
    }

    #[test]
    fn fit_ranks_by_frequency() {
        let enc = FeatureEncoding::fit(&sample_records()).unwrap();
        assert_eq!(enc.positions, vec!["Dev", "QA"]);
        assert_eq!(enc.min_salary, 50000.0);
        assert_eq!(enc.max_salary, 100000.0);
        assert_eq!(enc.input_size(), 3);
    }

    #[test]
    fn ties_keep_first_appearance() {
        let records = vec![
            Record::new("C", 0, 1.0),
            Record::new("A", 0, 2.0),
            Record::new("B", 0, 3.0),
            Record::new("A", 0, 4.0),
        ];
        let enc = FeatureEncoding::fit(&records).unwrap();
        assert_eq!(enc.positions, vec!["A", "C", "B"]);
    }

    #[test]
    fn vocabulary_is_capped() {
        let records: Vec<Record> = (0..15)
            .flat_map(|i| {
                // position i appears 15 - i times
                (0..15 - i).map(move |_| Record::new(format!("P{i}"), 0, i as f64))
            })
            .collect();
        let enc = FeatureEncoding::fit(&records).unwrap();

        assert_eq!(enc.positions.len(), TOP_POSITIONS);
        assert_eq!(enc.positions[0], "P0");
        assert_eq!(enc.positions[9], "P9");
        assert_eq!(enc.input_size(), 11);
    }

    #[test]
    fn encodes_worked_example() {
        let records = sample_records();
        let enc = FeatureEncoding::fit(&records).unwrap();
        let samples = enc.encode_all(&records);

        let features: Vec<Vec<f64>> = samples.iter().map(|s| s.features.clone()).collect();
        let targets: Vec<f64> = samples.iter().map(|s| s.target).collect();

        assert_eq!(
            features,
            vec![vec![0.0, 1.0, 0.0], vec![1.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]
        );
        assert!((targets[0] - 0.8).abs() < 1e-12);
        assert_eq!(targets[1], 1.0);
        assert_eq!(targets[2], 0.0);
    }

    #[test]
    fn unknown_position_is_all_zero() {
        let enc = FeatureEncoding::fit(&sample_records()).unwrap();
        let features = enc.features(&Record::new("Manager", 1, 70000.0));
        assert_eq!(features, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn encoding_is_not_refitted_on_other_data() {
        let enc = FeatureEncoding::fit(&sample_records()).unwrap();
        // Outside the training bounds: the training range still applies.
        let sample = enc.encode(&Record::new("QA", 0, 125000.0));
        assert_eq!(sample.target, 1.5);
    }

    #[test]
    fn degenerate_range_normalizes_to_zero() {
        let enc = FeatureEncoding::fit(&[Record::new("Dev", 0, 10.0)]).unwrap();
        assert_eq!(enc.normalize(10.0), 0.0);
    }

    #[test]
    fn denormalize_inverts_normalize() {
        let enc = FeatureEncoding::fit(&sample_records()).unwrap();
        assert!((enc.denormalize(enc.normalize(72000.0)) - 72000.0).abs() < 1e-6);
    }

    #[test]
    fn fit_on_nothing_fails() {
        assert!(matches!(
            FeatureEncoding::fit(&[]),
            Err(NnError::EmptyDataset(_))
        ));
    }
}
