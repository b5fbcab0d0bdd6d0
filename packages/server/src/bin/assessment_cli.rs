//! Operator CLI for the assessment database
//!
//! Applies migrations and runs the assessment pipeline for a single contact
//! without going through HTTP. Output is JSON on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use assessment_core::domains::assessments::{assess_contact, SnippetSampler};
use assessment_core::domains::conversations::Conversation;
use assessment_core::kernel::{create_classifier, ServerDeps};
use assessment_core::Config;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "assessment-cli")]
#[command(about = "Contact assessment operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Assess one contact and print the stored rows
    Assess { contact_id: String },

    /// Print a contact's snippets, or a random sample of their ids
    Snippets {
        contact_id: String,
        #[arg(long)]
        sample: Option<usize>,
    },
}

#[derive(Serialize)]
struct MigrateResponse {
    success: bool,
    message: String,
}

fn output<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,assessment_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Migrate => cmd_migrate(&config).await,
        Commands::Assess { contact_id } => cmd_assess(&config, &contact_id).await,
        Commands::Snippets { contact_id, sample } => {
            cmd_snippets(&config, &contact_id, sample).await
        }
    }
}

async fn get_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_with(config.database.connect_options()?)
        .await
        .context("Failed to connect to database")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_migrate(config: &Config) -> Result<()> {
    let pool = get_pool(config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output(&MigrateResponse {
        success: true,
        message: "Migrations complete".to_string(),
    })
}

async fn cmd_assess(config: &Config, contact_id: &str) -> Result<()> {
    let pool = get_pool(config).await?;
    let classifier = create_classifier(&config.classifier)?;
    let deps = ServerDeps::new(classifier, Arc::new(SnippetSampler::from_entropy()));

    let mut conn = pool.acquire().await?;
    let stored = assess_contact(contact_id, &deps, &mut conn).await?;

    output(&stored)
}

async fn cmd_snippets(config: &Config, contact_id: &str, sample: Option<usize>) -> Result<()> {
    let pool = get_pool(config).await?;
    let mut conn = pool.acquire().await?;

    let conversation = Conversation::fetch(contact_id, &mut conn).await?;
    match sample {
        Some(count) => {
            let snippets = conversation.snippets()?;
            output(&SnippetSampler::from_entropy().sample(&snippets, count))
        }
        None => output(&conversation.raw_snippets()?),
    }
}
