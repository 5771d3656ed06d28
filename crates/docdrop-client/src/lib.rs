//! HTTP client for the docdrop upload server.
//!
//! One multi-part upload call with byte-level progress reporting, and the
//! listing fetch the reconciler treats as authoritative. No retries here:
//! retry policy, if any, belongs to the caller.

pub mod progress;

use anyhow::{Context, Result};
use bytes::Bytes;
use docdrop_core::models::{CandidateFile, RemoteFileRecord, RemoteListing, UploadOutcome};
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub use progress::ProgressObserver;
use progress::ProgressTracker;

/// Multipart field name the server contract fixes for every file part.
const UPLOAD_FIELD_NAME: &str = "files";

const UPLOAD_PATH: &str = "/upload";
const LISTING_PATH: &str = "/upload/files";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const BODY_CHUNK_BYTES: usize = 64 * 1024;

/// Transport failure for one submission.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("upload failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    #[error("invalid upload part {name}: {reason}")]
    InvalidPart { name: String, reason: String },
}

/// Listing fetch failure. Always non-fatal to the caller, which degrades to
/// the cached view.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing request failed with status {status}")]
    Http { status: u16 },

    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    #[error("malformed listing body: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// Body of one upload part.
pub enum PartBody {
    /// Whole content in memory; length known.
    Bytes(Bytes),
    /// Streamed content; length may be unknown, in which case progress is
    /// reported as indeterminate for the whole submission.
    Stream {
        stream: BoxStream<'static, std::io::Result<Bytes>>,
        content_length: Option<u64>,
    },
}

/// One file in the multipart batch.
pub struct UploadPart {
    pub file_name: String,
    pub content_type: String,
    pub body: PartBody,
}

impl UploadPart {
    pub fn from_candidate(candidate: &CandidateFile) -> Self {
        Self {
            file_name: candidate.name.clone(),
            content_type: candidate.content_type.clone(),
            body: PartBody::Bytes(candidate.data.clone()),
        }
    }

    fn content_length(&self) -> Option<u64> {
        match &self.body {
            PartBody::Bytes(data) => Some(data.len() as u64),
            PartBody::Stream { content_length, .. } => *content_length,
        }
    }
}

/// Total bytes of the batch, when every part's length is known.
fn batch_total(parts: &[UploadPart]) -> Option<u64> {
    parts.iter().map(UploadPart::content_length).sum()
}

fn chunked(data: Bytes) -> BoxStream<'static, std::io::Result<Bytes>> {
    let len = data.len();
    futures::stream::iter(
        (0..len)
            .step_by(BODY_CHUNK_BYTES)
            .map(move |offset| Ok(data.slice(offset..(offset + BODY_CHUNK_BYTES).min(len)))),
    )
    .boxed()
}

/// HTTP client for the docdrop server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Connect timeout only: an upload in flight has no overall deadline, so
    /// a network failure is the only way a pending request resolves.
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: DOCDROP_API_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DOCDROP_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit the whole batch as one logical multipart POST, repeated field
    /// name `files`. Progress is reported through `observer` as a
    /// non-decreasing fraction while the batch total is known, otherwise as
    /// tagged indeterminate observations.
    ///
    /// A 2xx response with an unparseable body resolves to the default
    /// outcome rather than failing; the server's counts are never overridden.
    pub async fn submit(
        &self,
        parts: Vec<UploadPart>,
        observer: ProgressObserver,
    ) -> Result<UploadOutcome, TransportError> {
        let batch_size = parts.len();
        let tracker = ProgressTracker::new(batch_total(&parts), observer);
        tracker.observe_start();

        let mut form = Form::new();
        for part in parts {
            let content_length = part.content_length();
            let body = match part.body {
                PartBody::Bytes(data) => chunked(data),
                PartBody::Stream { stream, .. } => stream,
            };
            let counted = reqwest::Body::wrap_stream(tracker.count(body));

            let form_part = match content_length {
                Some(len) => Part::stream_with_length(counted, len),
                None => Part::stream(counted),
            }
            .file_name(part.file_name.clone())
            .mime_str(&part.content_type)
            .map_err(|e| TransportError::InvalidPart {
                name: part.file_name,
                reason: e.to_string(),
            })?;

            form = form.part(UPLOAD_FIELD_NAME, form_part);
        }

        let url = self.build_url(UPLOAD_PATH);
        tracing::info!(url = %url, batch_size, "submitting upload batch");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        match response.json::<serde_json::Value>().await {
            Ok(raw) => Ok(UploadOutcome::from_value(raw)),
            Err(e) => {
                tracing::debug!(error = %e, "upload response body not structured, using default outcome");
                Ok(UploadOutcome::default())
            }
        }
    }

    /// Fetch the authoritative server listing. The caller treats any failure
    /// as "no remote data available", never as fatal.
    pub async fn fetch_listing(&self) -> Result<Vec<RemoteFileRecord>, ListingError> {
        let url = self.build_url(LISTING_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ListingError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Http {
                status: status.as_u16(),
            });
        }

        let listing: RemoteListing = response.json().await.map_err(ListingError::Malformed)?;
        Ok(listing.files)
    }
}
