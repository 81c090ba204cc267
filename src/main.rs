// This is the entry point of the sources tool.
//
// **Architecture Overview:**
// - `core/` = Business logic (turning sheet rows into a laid-out sources doc)
// - `infra/` = Implementations of core traits (Google Sheets/Docs/Drive APIs)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Ask which sheet to read
// 4. Run the pipeline and report what happened

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::config::AppConfig;
use crate::core::sources::{SourcesRequest, SourcesService};
use crate::infra::google::{GoogleAuth, GoogleDocsClient, GoogleSheetsClient};

/// Prints `prompt` and reads one trimmed line from stdin.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let line = lines
        .next_line()
        .await?
        .context("stdin closed before an answer was given")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // One token source shared by every Google client.

    let auth = Arc::new(
        GoogleAuth::from_source(&config.auth)
            .await
            .context("Failed to set up Google credentials")?,
    );
    let sheets = GoogleSheetsClient::new(Arc::clone(&auth));
    let docs = GoogleDocsClient::new(Arc::clone(&auth));
    let service = SourcesService::new(sheets, docs);

    // ========================================================================
    // PROMPTS
    // ========================================================================

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let sheet_name = prompt(
        &mut lines,
        "Enter the full name (i.e. version) of the Sheet: ",
    )
    .await?;
    let sheet_id = prompt(&mut lines, "Enter the Sheet ID: ").await?;

    let request = SourcesRequest {
        sheet_id,
        sheet_name,
        folder_id: config.sources_folder_id,
    };

    // ========================================================================
    // RUN
    // ========================================================================

    let report = service
        .run(&request)
        .await
        .context("Could not build the sources doc")?;

    println!("✅ Added the data to the doc successfully!");
    println!("📁 Doc moved to the Sources folder");
    println!(
        "📄 '{}' ({}): {} section(s), {} link(s)",
        report.document_title, report.document_id, report.section_count, report.link_count
    );

    Ok(())
}
