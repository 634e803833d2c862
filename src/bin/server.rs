//! Finance MCP server binary.
//!
//! Loads the configuration, opens and migrates the SQLite store, then serves
//! the MCP tools over stdio until the client disconnects.

use std::path::PathBuf;

use clap::Parser;
use finance_mcp::config::{Config, ConfigError};
use finance_mcp::db::{DbError, SqliteDatabase};
use finance_mcp::mcp::McpServer;
use finance_mcp::ops::QueryOps;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(finance::binary::config))]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    #[diagnostic(code(finance::binary::database))]
    Database(#[from] DbError),

    #[error("MCP server error: {0}")]
    #[diagnostic(code(finance::binary::server))]
    Server(String),
}

#[derive(Parser)]
#[command(name = "finance-mcp")]
#[command(author, version, about = "MCP server over accounts, categories and transactions", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $MCP_SERVER_CONFIG, then config.yml beside the binary)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file path, overriding `database.path` from the configuration
    #[arg(long)]
    db: Option<String>,

    /// Do not run schema migrations on startup
    #[arg(long)]
    skip_migrations: bool,
}

/// Logs go to stderr; stdout carries the protocol.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finance_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();
    run(Cli::parse()).await?;
    Ok(())
}

async fn run(cli: Cli) -> Result<(), BinaryError> {
    let mut config = match cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.database.path = db;
    }

    let db = SqliteDatabase::connect(&config.database).await?;
    if !cli.skip_migrations {
        db.migrate().await?;
    }

    let query = QueryOps::with_pool(db.pool().clone());
    let service = McpServer::new(query)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BinaryError::Server(e.to_string()))?;

    info!("MCP server listening on stdio");
    service
        .waiting()
        .await
        .map_err(|e| BinaryError::Server(e.to_string()))?;

    Ok(())
}
