use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{error, info};

use crate::config::UploadRequest;
use crate::runlog;
use crate::store::S3ObjectStore;
use crate::upload::{self, UploadOutcome};

const UPLOAD_ENV_HELP: &str = "\
Environment Variables:

  The upload command requires these environment variables:

  - AWS_ACCESS_KEY_ID
  - AWS_SECRET_ACCESS_KEY
  - AWS_BUCKET
  - AWS_REGION

  Optionally specify a bucket prefix, session token or
  S3-compatible endpoint:

  - AWS_PREFIX
  - AWS_SESSION_TOKEN
  - AWS_ENDPOINT";

/// CLI for rover: capture diagnostics and ship the archive to retention.
#[derive(Parser)]
#[clap(
    name = "rover",
    version,
    about = "Captures diagnostic archives and ships them to S3 retention storage"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload an archive file to an S3 bucket
    #[clap(after_help = UPLOAD_ENV_HELP)]
    Upload {
        /// Archive filename
        #[clap(long, default_value = "rover.zip")]
        file: PathBuf,
    },
}

/// Async entrypoint for the parsed CLI, shared by main() and the
/// integration tests. Reports every result to the operator and the run
/// log; exit codes are decided by main() alone.
pub async fn run(cli: Cli) -> Result<UploadOutcome> {
    match cli.command {
        Commands::Upload { file } => upload_command(file).await,
    }
}

async fn upload_command(file: PathBuf) -> Result<UploadOutcome> {
    let host_name = gethostname::gethostname().to_string_lossy().into_owned();

    if let Err(err) = runlog::init(&host_name) {
        eprintln!("{err}");
        return Err(err.into());
    }
    info!(host = %host_name, "upload starting");
    info!(os = std::env::consts::OS, "detected operating system");

    let request = match UploadRequest::from_env(file, host_name) {
        Ok(request) => request,
        Err(err) => {
            error!("missing at least one of the required AWS credential environment variables");
            eprintln!("{err}");
            return Err(err.into());
        }
    };

    let store = S3ObjectStore::connect(&request).await;
    match upload::run(&request, &store).await {
        Ok(outcome) => {
            if outcome.succeeded {
                println!(
                    "{}",
                    format!("Success! Uploaded s3://{}/{}", outcome.bucket, outcome.key)
                        .green()
                        .bold()
                );
            } else if let Some(detail) = &outcome.error_detail {
                eprintln!("Upload failed: {detail}");
            }
            Ok(outcome)
        }
        Err(err) => {
            eprintln!("{err}");
            Err(err.into())
        }
    }
}
