mod cache;
mod conduit;
mod config;
mod enrich;
mod error;
mod model;
mod report;
#[cfg(test)]
mod test_support;
mod utils;

use crate::conduit::ConduitClient;
use crate::config::Credentials;
use crate::report::{CsvReport, ReportDriver, ReportSummary};
use crate::utils::ConsoleProgress;
use clap::Parser;
use model::Result;
use std::path::PathBuf;
use std::process::ExitCode;

/// Writes a CSV report of the Differential revisions you authored.
#[derive(Parser, Debug, Clone)]
#[command(version)]
struct Args {
    /// CSV file to write
    output: PathBuf,
    /// Maximum number of revisions to fetch
    #[arg(long)]
    limit: Option<u32>,
    /// Extra `differential.query` parameter, passed through as is
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,
    /// Credential file, defaults to ~/.arcrc
    #[arg(long = "arcrc")]
    arcrc_path: Option<PathBuf>,
    /// Conduit API url from the credential file, defaults to the first one
    #[arg(long = "host")]
    host: Option<String>,
    /// Maximum number of concurrent API requests
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
}

impl Args {
    fn filters(&self) -> Vec<(String, String)> {
        let mut filters = self.params.clone();
        if let Some(limit) = self.limit {
            filters.push(("limit".to_string(), limit.to_string()));
        }
        filters
    }
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut progress = ConsoleProgress::new();
    match run(&args, &mut progress).await {
        Ok(summary) => {
            if !summary.skipped.is_empty() {
                log::warn!(
                    "{} revision(s) left out of {}: {:?}",
                    summary.skipped.len(),
                    args.output.display(),
                    summary.skipped
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            progress.abandon(&err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, progress: &mut ConsoleProgress) -> Result<ReportSummary> {
    let arcrc_path = match &args.arcrc_path {
        Some(path) => path.clone(),
        None => Credentials::default_path()?,
    };
    let credentials = Credentials::from_config(&arcrc_path, args.host.as_deref())?;
    log::info!("Using Conduit at {}", credentials.host);

    let client = ConduitClient::new(credentials, args.concurrency)?;
    let mut report = CsvReport::create(&args.output)?;
    let driver = ReportDriver::new(&client);
    let summary = driver.run(&args.filters(), &mut report, progress).await?;
    log::debug!(
        "Resolved {} user(s) and {} repositories",
        driver.caches().users.len(),
        driver.caches().repos.len()
    );
    Ok(summary)
}
