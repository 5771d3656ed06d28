//! docdrop CLI — submit document batches and browse "my uploads".
//!
//! Set DOCDROP_API_URL (or API_URL) to point at the upload server.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docdrop_app::{Renderer, Tab, UploadCoordinator};
use docdrop_cli::{candidate_from_path, init_tracing};
use docdrop_client::ApiClient;
use docdrop_core::config::{AppConfig, UPLOAD_CACHE_KEY};
use docdrop_core::models::{CandidateFile, DisplayEntry, Progress};
use docdrop_store::{JsonFileStore, UploadCache};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docdrop", about = "Batch document upload client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more documents as a single batch
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
    },
    /// Show the reconciled "my uploads" listing
    List,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Terminal renderer: warnings and progress to stderr, listings as JSON to
/// stdout.
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render_selection(&self, _files: &[CandidateFile]) {}

    fn render_warnings(&self, warnings: &[String]) {
        for warning in warnings {
            eprintln!("warning: {}", warning);
        }
    }

    fn render_uploads(&self, entries: &[DisplayEntry]) {
        if let Err(e) = print_json(&entries) {
            eprintln!("error: {}", e);
        }
    }

    fn render_progress(&self, progress: Progress) {
        match progress {
            Progress::Fraction(f) => eprint!("\ruploading... {:3.0}%", f * 100.0),
            Progress::Indeterminate { bytes_sent } => {
                eprint!("\ruploading... {} bytes", bytes_sent)
            }
        }
        let _ = std::io::stderr().flush();
    }

    fn render_upload_result(&self, message: &str) {
        eprintln!("\n{}", message);
    }

    fn render_upload_failed(&self, message: &str) {
        eprintln!("\n{}", message);
    }

    fn set_submit_enabled(&self, _enabled: bool) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let client = ApiClient::new(config.api_url.clone()).context("Failed to create API client")?;
    let cache = UploadCache::new(JsonFileStore::new(&config.cache_path), UPLOAD_CACHE_KEY);
    let mut coordinator = UploadCoordinator::new(
        config.policy.clone(),
        client,
        cache,
        Arc::new(ConsoleRenderer),
    );

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { files } => {
            let mut candidates = Vec::with_capacity(files.len());
            for path in &files {
                candidates.push(candidate_from_path(path)?);
            }
            coordinator.on_files_selected(candidates);
            if coordinator.selection_len() == 0 {
                anyhow::bail!("no files admitted for upload");
            }
            coordinator.on_submit().await;
            // A successful submission clears the queue; anything left means
            // the batch failed and was kept for retry.
            if coordinator.selection_len() > 0 {
                std::process::exit(1);
            }
        }
        Commands::List => {
            coordinator.on_tab_activated(Tab::MyUploads).await;
        }
    }

    Ok(())
}
