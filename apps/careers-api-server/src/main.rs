mod host;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jobs::{AppConfig, JobsApp, telemetry};
use mimalloc::MiMalloc;

use host::HostMode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Japan Tech Careers API - job listings over HTTP
#[derive(Parser)]
#[command(name = "careers-api-server")]
#[command(about = "Japan Tech Careers API - job listings over HTTP")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the HTTP listener (ignored in invocation mode)
    #[arg(short, long, default_value_t = host::listener::DEFAULT_PORT)]
    port: u16,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env
    let config = AppConfig::load(cli.config.as_deref())?;

    telemetry::init_logging(&config.log_level, cli.verbose);

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        api_endpoint = %config.api_endpoint,
        api_timeout_secs = config.api_timeout,
        "Configuration loaded"
    );

    if cli.print_config {
        println!("Effective configuration:\n{}", to_json(&config)?);
        return Ok(());
    }

    // Dispatch subcommands (default: run)
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, cli.port).await,
        Commands::Check => check_config(config),
    }
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let rendered = to_json(&config)?;
    // Wiring validates the upstream endpoint
    JobsApp::build(config)?;
    println!("Configuration is valid");
    println!("{rendered}");
    Ok(())
}

async fn run_server(config: AppConfig, port: u16) -> Result<()> {
    let app = JobsApp::build(config).inspect_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "Failed to initialize application");
    })?;
    tracing::info!("Application initialized successfully");

    let mode = HostMode::detect();
    tracing::info!(mode = mode.as_str(), "Selected host mode");

    match mode {
        HostMode::Listener => host::listener::serve(app.into_router(), port).await,
        HostMode::Invocation => host::invocation::serve(app.into_router()).await,
    }
}

fn to_json(config: &AppConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
