#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use salary_nn::TrainingSample;

/// Target is fully determined by feature 0; feature 1 is a constant bias input.
pub fn separable_data(n: usize) -> Vec<TrainingSample> {
    (0..n)
        .map(|i| {
            let x = (i % 2) as f64;
            TrainingSample::new(vec![x, 1.0], if x == 0.0 { 0.2 } else { 0.8 })
        })
        .collect()
}

/// Fresh path under the system temp dir, unique per call within this process.
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("salary-nn-{}-{n}-{name}", std::process::id()))
}
