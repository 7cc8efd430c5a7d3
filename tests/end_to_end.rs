mod common;

use std::fs;

use salary_nn::data::{load_records, parse_records};
use salary_nn::eval::{save_predictions_csv, PREDICTIONS_HEADER};
use salary_nn::{evaluate, train, FeatureEncoding, Network, NnError, TrainMode};

use common::temp_path;

const TRAIN_CSV: &str = "\
Id,Position,Gender,Salary
1,Dev,Masculino,90000
2,Dev,Femenino,100000
3,QA,Masculino,50000
4,QA,Masculino
";

const TEST_CSV: &str = "\
Id,Position,Gender,Salary
1,QA,Femenino,75000
2,Manager,Masculino,100000
3,Dev,Masculino,not-a-number
";

#[test]
fn worked_example_encodes_as_documented() {
    let records = parse_records(TRAIN_CSV);
    assert_eq!(records.len(), 3, "the 3-column row must be dropped");

    let encoding = FeatureEncoding::fit(&records).unwrap();
    assert_eq!(encoding.positions, vec!["Dev", "QA"]);

    let samples = encoding.encode_all(&records);
    let features: Vec<&[f64]> = samples.iter().map(|s| s.features.as_slice()).collect();
    assert_eq!(
        features,
        vec![&[0.0, 1.0, 0.0][..], &[1.0, 1.0, 0.0][..], &[0.0, 0.0, 1.0][..]]
    );
    let targets: Vec<f64> = samples.iter().map(|s| s.target).collect();
    assert!((targets[0] - 0.8).abs() < 1e-12);
    assert_eq!(&targets[1..], &[1.0, 0.0]);
}

#[test]
fn test_set_uses_training_encoding() {
    let encoding = FeatureEncoding::fit(&parse_records(TRAIN_CSV)).unwrap();
    let test_records = parse_records(TEST_CSV);
    assert_eq!(test_records.len(), 2, "the malformed salary row must be dropped");

    let samples = encoding.encode_all(&test_records);
    assert_eq!(samples[0].features, vec![1.0, 0.0, 1.0]);
    assert_eq!(samples[0].target, 0.5);
    // Unknown position: zero one-hot segment, bounds still from training.
    assert_eq!(samples[1].features, vec![0.0, 0.0, 0.0]);
    assert_eq!(samples[1].target, 1.0);
}

#[test]
fn full_pipeline_from_files() {
    let train_path = temp_path("train.csv");
    let test_path = temp_path("test.csv");
    let predictions_path = temp_path("predictions.csv");
    fs::write(&train_path, TRAIN_CSV).unwrap();
    fs::write(&test_path, TEST_CSV).unwrap();

    let records = load_records(&train_path).unwrap();
    let encoding = FeatureEncoding::fit(&records).unwrap();
    let samples = encoding.encode_all(&records);

    let mut network = Network::with_seed(encoding.input_size(), 5, 1).unwrap();
    train(&mut network, &samples, 100, TrainMode::Parallel, 0.01).unwrap();

    let test_samples = encoding.encode_all(&load_records(&test_path).unwrap());
    let evaluation = evaluate(&network, &test_samples).unwrap();
    save_predictions_csv(&evaluation.results, &predictions_path).unwrap();

    let written = fs::read_to_string(&predictions_path).unwrap();
    for path in [&train_path, &test_path, &predictions_path] {
        fs::remove_file(path).ok();
    }

    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], PREDICTIONS_HEADER);
    assert_eq!(lines.len(), 1 + test_samples.len());
    assert!(lines[1].starts_with("1.0000|0.0000|1.0000,"));
    assert!(lines[2].starts_with("0.0000|0.0000|0.0000,"));

    let mean: f64 =
        evaluation.results.iter().map(|r| r.error).sum::<f64>() / evaluation.results.len() as f64;
    assert!((evaluation.mean_squared_error - mean).abs() < 1e-12);
}

#[test]
fn evaluating_nothing_fails() {
    let network = Network::with_seed(3, 2, 0).unwrap();
    assert!(matches!(
        evaluate(&network, &[]),
        Err(NnError::EmptyDataset(_))
    ));
}
