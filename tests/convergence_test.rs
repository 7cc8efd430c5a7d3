mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use salary_nn::{evaluate, train, Network, TrainMode};

use common::separable_data;

#[test]
fn sequential_training_reduces_error() {
    let data = separable_data(20);
    let mut network = Network::with_seed(2, 4, 17).unwrap();

    let before = evaluate(&network, &data).unwrap().mean_squared_error;
    let last_epoch = train(&mut network, &data, 500, TrainMode::Sequential, 0.5).unwrap();
    let after = evaluate(&network, &data).unwrap().mean_squared_error;

    assert!(
        after < before / 2.0,
        "Failed to converge, error went from {before} to {after}"
    );
    assert!(last_epoch < before);
}

#[test]
fn sequential_training_is_reproducible() {
    let data = separable_data(12);
    let mut a = Network::with_seed(2, 3, 5).unwrap();
    let mut b = Network::with_seed(2, 3, 5).unwrap();

    let ea = train(&mut a, &data, 30, TrainMode::Sequential, 0.1).unwrap();
    let eb = train(&mut b, &data, 30, TrainMode::Sequential, 0.1).unwrap();

    assert_eq!(ea, eb);
    assert_eq!(a, b);
}

#[test]
fn parallel_training_stays_finite() {
    let data = separable_data(200);
    let mut network = Network::with_seed(2, 4, 17).unwrap();

    let error = train(&mut network, &data, 50, TrainMode::Parallel, 0.5).unwrap();
    assert!(error.is_finite());

    let probe = network.forward(&[1.0, 1.0]).unwrap();
    assert!(probe > 0.0 && probe < 1.0);
}

#[test]
fn parallel_matches_sequential_without_contention() {
    let data = separable_data(1);
    let mut seq = Network::with_seed(2, 6, 23).unwrap();
    let mut par = seq.clone();

    let es = train(&mut seq, &data, 20, TrainMode::Sequential, 0.3).unwrap();
    let ep = train(&mut par, &data, 20, TrainMode::Parallel, 0.3).unwrap();

    assert_eq!(es, ep);
    assert_eq!(seq, par);
}

#[test]
fn forward_output_is_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..50 {
        let input_size = rng.gen_range(1..12);
        let hidden_size = rng.gen_range(1..8);
        let network = Network::with_rng(input_size, hidden_size, &mut rng).unwrap();
        let input: Vec<f64> = (0..input_size).map(|_| rng.gen_range(-3.0..3.0)).collect();

        let y = network.forward(&input).unwrap();
        assert!(y > 0.0 && y < 1.0, "forward returned {y}");
        assert_eq!(y, network.forward(&input).unwrap());
    }
}
