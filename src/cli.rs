use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::FlatPayoutQueueConfig,
    error::AppError,
    resource::diff_config,
    translate::{build_payout_queue_config, flatten_payout_queue_config},
    types::PayoutQueueConfig,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a flat payout queue config into the service config message
    Build {
        /// JSON file holding the flat config attributes
        #[clap(short, long, value_parser)]
        input_file: PathBuf,

        /// Also write the result to this file
        #[clap(short, long, value_parser)]
        output_file: Option<PathBuf>,
    },
    /// Convert a service config message back into flat attributes
    Flatten {
        /// JSON file holding the service config message
        #[clap(short, long, value_parser)]
        input_file: PathBuf,

        /// Also write the result to this file
        #[clap(short, long, value_parser)]
        output_file: Option<PathBuf>,
    },
    /// Compare desired flat attributes with the last config read from the service
    Diff {
        /// JSON file holding the desired flat config attributes
        #[clap(short, long, value_parser)]
        desired: PathBuf,

        /// JSON file holding the service config message
        #[clap(short, long, value_parser)]
        observed: PathBuf,
    },
}

/// Outcome of a command that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Drift,
}

pub fn run(args: CliArgs) -> Result<Outcome, AppError> {
    match args.command {
        Command::Build { input_file, output_file } => {
            let flat: FlatPayoutQueueConfig = read_json_file(&input_file)?;
            let config = build_payout_queue_config(&flat)?;
            log::info!("built payout queue config from {:?}", input_file);
            emit(&config, output_file.as_deref())?;
        }
        Command::Flatten { input_file, output_file } => {
            let config: PayoutQueueConfig = read_json_file(&input_file)?;
            let flat = flatten_payout_queue_config(&config);
            log::info!("flattened payout queue config from {:?}", input_file);
            emit(&flat, output_file.as_deref())?;
        }
        Command::Diff { desired, observed } => {
            let desired: FlatPayoutQueueConfig = read_json_file(&desired)?;
            let observed: PayoutQueueConfig = read_json_file(&observed)?;

            let changes = diff_config(&desired, &flatten_payout_queue_config(&observed));
            if changes.is_empty() {
                log::info!("no drift");
                return Ok(Outcome::Done);
            }
            for change in &changes {
                println!("{}", change);
            }
            log::info!("{} attribute(s) drifted", changes.len());
            return Ok(Outcome::Drift);
        }
    }
    Ok(Outcome::Done)
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        log::error!("failed to read input file: {:?}", path);
        AppError::Io(e)
    })?;

    serde_json::from_str(&content).map_err(|e| {
        log::error!("failed to parse input JSON.");
        AppError::JsonParse {
            file_path: path.to_path_buf(),
            source: e,
        }
    })
}

fn emit<T: Serialize>(value: &T, output_file: Option<&Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);

    if let Some(path) = output_file {
        fs::write(path, json.as_bytes()).map_err(|e| {
            log::error!("failed to write output file: {:?}", path);
            AppError::Io(e)
        })?;
        log::info!("saved result to {:?}", path);
    }
    Ok(())
}
