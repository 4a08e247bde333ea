mod args;
mod convert;
mod reference;
mod results;

use std::process::ExitCode;

use anyhow::Context;
use common::{error::AppError, utils::config::get_config};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{convert::Converter, reference::ReferenceIndex};

fn main() -> ExitCode {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(raw_line) = format_error_line(&err) {
                println!("ERROR: line - {raw_line}");
                error!("{err:#}");
                return ExitCode::from(1);
            }
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = args::parse();
    let settings = get_config().context("loading settings")?;

    println!("Dataset: {}", config.dataset.display());
    println!("Result: {}", config.result.display());
    println!("Output: {}", config.output.display());

    args::ensure_dir(&config.output)?;

    let index = ReferenceIndex::load(&config.dataset)?;
    info!(
        delimiter = settings.delimiter.as_str(),
        entity_tag = settings.entity_tag.as_str(),
        "Converting entity detection results"
    );
    Converter::new(&index, &settings).convert_all(&config.result, &config.output)?;

    println!("DONE!");
    println!("Converted the results after entity detection to query text.");
    Ok(())
}

/// Raw line of the first result format error in the chain, if any.
fn format_error_line(err: &anyhow::Error) -> Option<&str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<AppError>())
        .and_then(AppError::format_line)
}
