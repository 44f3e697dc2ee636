#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tagsweep::aws::TaggingClient;
use tagsweep::commands::{apply, audit};
use tracing_subscriber::prelude::*;

/// Audit and backfill metadata tags across AWS resources.
#[derive(Parser, Debug)]
#[command(name = "tagsweep", version, about)]
struct Cli {
    /// AWS region (defaults to the profile/environment region)
    #[arg(long, global = true)]
    region: Option<String>,

    /// AWS credentials profile
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover resources and report the ones missing the target tag
    Audit(audit::AuditArgs),
    /// Apply a tag to each resource listed in a CSV
    Apply(apply::ApplyArgs),
}

fn init_logging() -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open("tagging.log")
        .context("failed to open tagging.log")?;

    let filter = tracing_subscriber::EnvFilter::builder()
        .with_env_var("RUST_LOG")
        .try_from_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(
                "tagsweep=info,aws_config=warn,aws_smithy_runtime=warn,hyper=warn",
            )
        });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let client = TaggingClient::load(cli.region, cli.profile).await;

    match &cli.command {
        Command::Audit(args) => audit::run(&client, args).await,
        Command::Apply(args) => apply::run(&client, args).await,
    }
}
