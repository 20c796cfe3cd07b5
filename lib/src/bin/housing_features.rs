//! Build feature tables from Ames Housing CSV files.
//!
//! ```text
//! housing-features <train.csv> <out.csv> [<test.csv> <test_out.csv>]
//! ```
//!
//! The pipeline is fitted on the training file; the test file, when given, is
//! encoded with the training vocabulary. Set `RUST_LOG` to adjust logging.

use housing_features::{FeaturePipeline, Table, Transformer};
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: housing-features <train.csv> <out.csv> [<test.csv> <test_out.csv>]";

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let (train_path, out_path, test_paths) = match args {
        [train, out] => (train, out, None),
        [train, out, test, test_out] => (train, out, Some((test, test_out))),
        _ => return Err(USAGE.into()),
    };

    let train = Table::from_csv_path(train_path)?;
    tracing::info!(path = %train_path, rows = train.n_rows(), "Loaded training table");

    let fitted = FeaturePipeline::ames().fit(&train)?;
    let features = fitted.complete_data(&train)?;
    features.to_csv_path(out_path)?;
    tracing::info!(path = %out_path, shape = ?features.shape(), "Wrote training features");

    if let Some((test_path, test_out_path)) = test_paths {
        let test = Table::from_csv_path(test_path)?;
        let features = fitted.complete_data(&test)?;
        features.to_csv_path(test_out_path)?;
        tracing::info!(path = %test_out_path, shape = ?features.shape(), "Wrote test features");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "housing_features=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
