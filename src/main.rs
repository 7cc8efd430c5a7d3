use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use salary_nn::data::load_records;
use salary_nn::eval::{evaluate, save_predictions_csv};
use salary_nn::{FeatureEncoding, Network, RunConfig, RunMode, TrainConfig, TrainMode};

/// Trains a one-hidden-layer network to predict normalized salaries from
/// position and gender, then evaluates it on a held-out set.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with a run configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the datasets and receiving the outputs
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    train_file: Option<PathBuf>,
    #[arg(long)]
    test_file: Option<PathBuf>,
    #[arg(long)]
    hidden_size: Option<usize>,
    #[arg(long)]
    epochs: Option<usize>,
    #[arg(long)]
    learning_rate: Option<f64>,
    /// Seed for the initial weights; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads for parallel training
    #[arg(long)]
    threads: Option<usize>,
    /// sequential, parallel or compare
    #[arg(long)]
    mode: Option<RunMode>,
}

impl Args {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load_json(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(v) = self.data_dir {
            config.data_dir = v;
        }
        if let Some(v) = self.train_file {
            config.train_file = v;
        }
        if let Some(v) = self.test_file {
            config.test_file = v;
        }
        if let Some(v) = self.hidden_size {
            config.hidden_size = v;
        }
        if let Some(v) = self.epochs {
            config.epochs = v;
        }
        if let Some(v) = self.learning_rate {
            config.learning_rate = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let outcome = Args::parse().into_config().and_then(|config| run(&config));
    if let Err(e) = outcome {
        error!("{e:?}");
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<()> {
    let train_path = config.train_path();
    let records = load_records(&train_path)
        .with_context(|| format!("loading training data {}", train_path.display()))?;
    let encoding = FeatureEncoding::fit(&records)?;
    let samples = encoding.encode_all(&records);
    info!(
        "{} training samples, {} features",
        samples.len(),
        encoding.input_size()
    );

    let initial = match config.seed {
        Some(seed) => Network::with_seed(encoding.input_size(), config.hidden_size, seed)?,
        None => Network::new(encoding.input_size(), config.hidden_size)?,
    };

    let mut timings: Vec<(TrainMode, Duration, f64)> = Vec::new();
    let mut kept: Option<Network> = None;

    for &mode in config.mode.train_modes() {
        let mut network = initial.clone();
        let mut train_config = TrainConfig::new(config.epochs, config.learning_rate, mode);
        train_config.report_every = config.report_every;
        train_config.threads = config.threads;

        info!("{mode} training");
        let start = Instant::now();
        let last_error = salary_nn::train_loop(&mut network, &samples, &train_config)?;
        timings.push((mode, start.elapsed(), last_error));

        kept.get_or_insert(network);
    }

    println!("\nTraining results:");
    for (mode, elapsed, last_error) in &timings {
        println!(
            "{mode:>10} time: {}ms, final epoch error: {last_error:.6}",
            elapsed.as_millis()
        );
    }
    if let [(_, seq, _), (_, par, _)] = timings.as_slice() {
        let seq_ms = seq.as_secs_f64() * 1000.0;
        let par_ms = par.as_secs_f64() * 1000.0;
        if seq_ms > 0.0 {
            println!("Speed-up: {:.1}%", 100.0 - par_ms * 100.0 / seq_ms);
        }
    }

    let network = kept.context("no training mode was run")?;

    let model_path = config.model_path();
    network
        .save_json(&model_path)
        .with_context(|| format!("saving model {}", model_path.display()))?;
    let encoding_path = config.encoding_path();
    encoding
        .save_json(&encoding_path)
        .with_context(|| format!("saving encoding {}", encoding_path.display()))?;
    println!("Model saved to: {}", model_path.display());

    let loaded = Network::load_json(&model_path)
        .with_context(|| format!("loading model {}", model_path.display()))?;
    info!("model reloaded from {}", model_path.display());

    let test_path = config.test_path();
    let test_records = load_records(&test_path)
        .with_context(|| format!("loading test data {}", test_path.display()))?;
    let test_samples = encoding.encode_all(&test_records);

    let evaluation = evaluate(&loaded, &test_samples)?;
    let predictions_path = config.predictions_path();
    save_predictions_csv(&evaluation.results, &predictions_path)
        .with_context(|| format!("writing predictions {}", predictions_path.display()))?;

    println!("\nFirst 5 predictions:");
    println!("Input\t\t\t\tPredicted\tActual\t\tError");
    for result in evaluation.results.iter().take(5) {
        let features = result
            .input_features
            .iter()
            .map(|f| format!("{f:.2}"))
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "[{features}]\t{:.2}\t\t{:.2}\t{:.4}",
            encoding.denormalize(result.predicted_value),
            encoding.denormalize(result.actual_value),
            result.error
        );
    }

    println!("\nMean test error: {:.4}", evaluation.mean_squared_error);
    println!("Predictions exported to: {}", predictions_path.display());
    Ok(())
}
