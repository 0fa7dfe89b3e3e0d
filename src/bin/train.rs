//! One-shot training run over the synthetic crisis dataset.

use anyhow::{Context, Result};
use clap::Parser;
use ops_shield::training::pipeline::{self, TrainingConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "train",
    about = "Train cancellation classifiers and persist the artifacts"
)]
struct Args {
    /// Path to the crisis dataset CSV
    #[arg(long, default_value = "data/indigo_crisis_synthetic_dataset.csv")]
    dataset: PathBuf,

    /// Directory for the persisted model and scaler
    #[arg(long, default_value = "artifacts")]
    out: PathBuf,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 200)]
    trees: usize,

    /// Holdout fraction for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,

    /// Seed for the split and the forest
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ops_shield=info,train=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = TrainingConfig {
        dataset_path: args.dataset,
        artifact_dir: args.out,
        test_ratio: args.test_ratio,
        seed: args.seed,
        n_trees: args.trees,
    };

    let report = pipeline::run(&config).context("training run failed")?;

    tracing::info!(
        records = report.n_records,
        dropped = report.n_dropped,
        cancellation_rate = format!("{:.2}%", report.cancellation_rate * 100.0),
        train = report.train_size,
        test = report.test_size,
        "training complete"
    );
    tracing::info!(
        accuracy = format!("{:.4}", report.logistic.accuracy),
        roc_auc = format!("{:.4}", report.logistic.roc_auc),
        "logistic regression"
    );
    tracing::info!(
        accuracy = format!("{:.4}", report.forest.accuracy),
        roc_auc = format!("{:.4}", report.forest.roc_auc),
        "random forest"
    );

    tracing::info!("top drivers of flight cancellations:");
    for (name, importance) in report.feature_importances.iter().take(5) {
        tracing::info!("  {name}: {importance:.4}");
    }

    Ok(())
}
