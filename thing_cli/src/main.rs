mod args;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use thing_backup::{backup, BackupReport};
use thingiverse_client::ThingiverseClient;

use crate::args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let args = Args::parse();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()?
        .add_directive("hyper=info".parse()?)
        .add_directive("reqwest=info".parse()?)
        .add_directive("html5ever=info".parse()?)
        .add_directive("selectors=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Initialize client
    let client = ThingiverseClient::new(&args.base_url).context("invalid base URL")?;

    // 3. Run the backup
    let report = match backup(&client, &args.backup_options()).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    // 4. Write the report
    if let Some(path) = &args.report {
        write_report(&report, path)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn write_report(report: &BackupReport, path: &std::path::Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}
