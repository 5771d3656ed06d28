//! Helpers shared by the docdrop CLI binary.

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use docdrop_core::models::CandidateFile;
use std::path::Path;

/// Infer a content type from the file extension. The server's base policy
/// admits PDFs; anything unrecognized is declared as a generic byte stream
/// and left to the admission policy to refuse.
pub fn infer_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Build a candidate from a local file: content read whole, size and
/// last-modified taken from filesystem metadata.
pub fn candidate_from_path(path: &Path) -> Result<CandidateFile> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unnamed".to_string());

    let last_modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    Ok(CandidateFile {
        name,
        size: data.len() as u64,
        content_type: infer_content_type(path).to_string(),
        last_modified,
        data: Bytes::from(data),
    })
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
