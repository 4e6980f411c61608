use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "status-cli")]
#[command(about = "Query a running gateway-status service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the aggregated health snapshot
    Status,
    /// Show how the gateway sees this client
    Whoami,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let path = match cli.command {
        Commands::Status => "status",
        Commands::Whoami => "whoami",
    };

    let res = client
        .get(format!("{}/{}", cli.url.trim_end_matches('/'), path))
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await?;

    println!("{}", render_body(&text)?);

    // Non-zero exit on a failing verdict lets scripts gate on health.
    if !status.is_success() {
        eprintln!("HTTP {}", status);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Pretty-print JSON bodies; anything else is passed through.
fn render_body(text: &str) -> Result<String, serde_json::Error> {
    match serde_json::from_str::<Value>(text) {
        Ok(json) => serde_json::to_string_pretty(&json),
        Err(_) => Ok(text.to_string()),
    }
}
