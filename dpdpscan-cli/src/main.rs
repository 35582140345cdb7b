#![deny(missing_docs)]
//! dpdpscan command-line interface.
//!
//! Submits repository scans to a running dpdpscan server and renders the
//! results.

use clap::{Args, Parser, Subcommand, ValueEnum};
use dpdpscan_core::{ScanReport, render_scan_json, render_scan_text};
use serde::Serialize;

/// Request payload for the server's scan endpoint.
#[derive(Debug, Serialize)]
struct ScanRequest {
    repo_url: String,
}

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "dpdpscan", version, about = "DPDP compliance scanner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ServerArgs {
    /// Base URL of a running dpdpscan server.
    #[arg(
        long,
        env = "DPDPSCAN_SERVER",
        default_value = "http://127.0.0.1:8000"
    )]
    server: String,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a public repository for DPDP compliance heuristics.
    Scan {
        /// Repository URL to scan.
        #[arg(long)]
        url: String,
        #[command(flatten)]
        server: ServerArgs,
        /// Output format for the scan report.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check that the server is alive.
    Health {
        #[command(flatten)]
        server: ServerArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            url,
            server,
            format,
        } => run_scan(&server.server, &url, format).await?,
        Commands::Health { server } => run_health(&server.server).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

fn api_endpoint(base: &str, path: &str) -> String {
    format!("{}/api/{path}", base.trim_end_matches('/'))
}

fn error_message(body: &serde_json::Value) -> String {
    body.get("message")
        .and_then(|message| message.as_str())
        .unwrap_or("server returned an error")
        .to_string()
}

async fn run_scan(server: &str, url: &str, format: OutputFormat) -> CliResult<()> {
    let client = reqwest::Client::new();
    let response = client
        .post(api_endpoint(server, "scan"))
        .json(&ScanRequest {
            repo_url: url.to_string(),
        })
        .send()
        .await?;

    if !response.status().is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        return Err(format!("scan failed: {}", error_message(&body)).into());
    }

    let report: ScanReport = response.json().await?;
    match format {
        OutputFormat::Text => print!("{}", render_scan_text(&report)),
        OutputFormat::Json => println!("{}", render_scan_json(&report)?),
    }

    Ok(())
}

async fn run_health(server: &str) -> CliResult<()> {
    let client = reqwest::Client::new();
    let response = client.get(api_endpoint(server, "health")).send().await?;

    if !response.status().is_success() {
        return Err(format!("server unhealthy: status {}", response.status()).into());
    }

    println!("ok");
    Ok(())
}
