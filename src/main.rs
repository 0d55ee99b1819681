use clap::Parser;
use invest_team::constants::llm::DEFAULT_QUERY;
use invest_team::{AppConfig, TeamCoordinator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Run an investment analysis query through the four-agent team.
#[derive(Parser, Debug)]
#[command(name = "invest-team", version)]
struct Cli {
    /// Path to the YAML settings file (optional)
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Free-text query; words are joined with spaces
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Setup Logging (stderr, so stdout carries only the report)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            error!("❌ Failed to load .env: {}", e);
        }
    }

    // Load Configuration
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded Configuration: {:?}", config);

    let team = match TeamCoordinator::new(&config) {
        Ok(team) => team,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let query = if cli.query.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        cli.query.join(" ")
    };

    let rule = "=".repeat(80);
    println!("\n{}", rule);
    println!("{}", team.name().to_uppercase());
    println!("{}", rule);
    println!("Query: {}", query);
    println!("{}\n", rule);

    match team.submit_query(&query).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ Team run failed: {}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
