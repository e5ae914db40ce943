//! CLI administration tool for shorturl.
//!
//! Inspects and seeds the mapping store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Resolve a short id
//! cargo run --bin admin -- lookup 48213
//!
//! # Shorten a URL directly against the store
//! cargo run --bin admin -- shorten "example.com/docs" --no-dns
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (see `shorturl::config`).
//! `DATABASE_URL` or the `DB_*` components are required unless
//! `STORE_BACKEND=memory`.

use shorturl::config::{self, Config, StoreBackend};
use shorturl::domain::repositories::MappingRepository;
use shorturl::infrastructure::persistence::PgMappingRepository;
use shorturl::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Show the original URL for a short id
    Lookup {
        /// Numeric short id
        short_id: String,
    },

    /// Find or create the short id for a URL
    Shorten {
        /// URL to shorten
        url: String,

        /// Skip the DNS check regardless of DNS_VALIDATION
        #[arg(long)]
        no_dns: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Db {
            action: DbAction::Check,
        } => handle_db_check(&config).await?,
        Commands::Stats => handle_stats(&config).await?,
        Commands::Lookup { short_id } => handle_lookup(&config, &short_id).await?,
        Commands::Shorten { url, no_dns } => {
            if no_dns {
                config.dns_validation = false;
            }
            handle_shorten(&config, &url).await?
        }
    }

    Ok(())
}

/// Checks database connectivity and reports the server version.
async fn handle_db_check(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND=memory, nothing to check".yellow()
        );
        return Ok(());
    }

    let pool = server::connect_pool(config).await?;
    let repo = PgMappingRepository::new(Arc::new(pool.clone()));

    repo.ping()
        .await
        .map_err(|e| anyhow::anyhow!("Ping failed: {}", e))?;

    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&pool)
        .await?;

    println!("{}", "✅ Database connection successful!".green().bold());
    println!();
    println!("  Version: {}", version.bright_black());
    println!();

    Ok(())
}

/// Displays the number of stored mappings.
async fn handle_stats(config: &Config) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = server::build_repository(config).await?;
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    println!(
        "  {:<20} {}",
        "Mappings:".bright_white(),
        total.to_string().cyan().bold()
    );
    println!();

    Ok(())
}

/// Prints the mapping behind a short id.
async fn handle_lookup(config: &Config, raw_id: &str) -> Result<()> {
    let short_id = shorturl::api::dto::shorturl::parse_short_id(raw_id)
        .map_err(|_| anyhow::anyhow!("'{}' is not a numeric short id", raw_id))?;

    let repo = server::build_repository(config).await?;
    let state = server::build_state(config, repo);

    match state.mapping_service.lookup(short_id).await {
        Ok(mapping) => {
            println!("  Short id:  {}", mapping.short_id.to_string().bright_yellow());
            println!("  Original:  {}", mapping.original_url.cyan());
            println!(
                "  Created:   {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        Err(shorturl::AppError::NotFound { .. }) => {
            println!("{}", format!("❌ No mapping for {short_id}").red());
        }
        Err(e) => anyhow::bail!("Lookup failed: {}", e),
    }

    Ok(())
}

/// Shortens a URL with the same rules as `POST /api/shorturl`.
async fn handle_shorten(config: &Config, url: &str) -> Result<()> {
    let repo = server::build_repository(config).await?;
    let state = server::build_state(config, repo);

    let mapping = state
        .mapping_service
        .find_or_create(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten '{}': {}", url, e))?;

    println!("{}", "✅ Short URL ready".green().bold());
    println!();
    println!("  Original:  {}", mapping.original_url.cyan());
    println!(
        "  Short id:  {}",
        mapping.short_id.to_string().bright_yellow().bold()
    );
    println!(
        "  Redirect:  {}",
        format!("/api/shorturl/{}", mapping.short_id).bright_black()
    );
    println!();

    Ok(())
}
