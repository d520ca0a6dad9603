use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{init_tracing, load_config, Config};
use database::{connect, verify_schema, ClimateRepository};
use std::path::PathBuf;

/// The main entry point for the climate API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    // Held until exit so the file appender flushes.
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            handle_serve(config).await
        }
        Commands::CheckSchema => handle_check_schema(config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A read-only JSON API over a climate observation dataset.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, short, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the database schema, then serve the HTTP API.
    Serve(ServeArgs),
    /// Verify the database schema and print what was found.
    CheckSchema,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(config: Config) -> anyhow::Result<()> {
    let pool = connect(&config.database).await?;
    let report = verify_schema(&pool)
        .await
        .context("The database does not hold the expected climate tables")?;
    for table in &report.tables {
        tracing::info!(table = table.table, rows = table.rows, "Schema verified.");
    }

    web_server::run_server(&config.server, ClimateRepository::new(pool)).await
}

async fn handle_check_schema(config: Config) -> anyhow::Result<()> {
    let pool = connect(&config.database).await?;
    let report = verify_schema(&pool).await?;
    print!("{report}");
    pool.close().await;
    Ok(())
}
