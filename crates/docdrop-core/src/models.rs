use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A file chosen by the user but not yet submitted.
///
/// Owned exclusively by the selection queue; dropped on removal, on
/// successful submission, or on clear.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    /// Declared size in bytes. Normally equals `data.len()` but kept
    /// explicit because the selecting surface reports it separately.
    pub size: u64,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
    pub data: Bytes,
}

impl CandidateFile {
    /// Deduplication identity. Metadata tuple only, no content hashing.
    pub fn identity(&self) -> (&str, u64, DateTime<Utc>) {
        (&self.name, self.size, self.last_modified)
    }
}

/// Server-reported result of one batch submission.
///
/// `saved + skipped` need not equal the batch size; the server is
/// authoritative and the client never overrides its counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadOutcome {
    pub saved: u64,
    pub skipped: u64,
    /// The full response body, kept opaque.
    pub raw: Value,
}

impl UploadOutcome {
    /// Build an outcome from a parsed response body. Absent or non-integer
    /// `saved`/`skipped` fields default to 0 rather than failing the parse.
    pub fn from_value(raw: Value) -> Self {
        let saved = raw.get("saved").and_then(Value::as_u64).unwrap_or(0);
        let skipped = raw.get("skipped").and_then(Value::as_u64).unwrap_or(0);
        Self { saved, skipped, raw }
    }

    /// Prefer the server's own message; derive one from the counts when the
    /// field is absent.
    pub fn display_message(&self) -> String {
        match self.raw.get("message").and_then(Value::as_str) {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => format!("Saved {}, skipped {}", self.saved, self.skipped),
        }
    }
}

/// Persisted local record of a previously submitted file.
///
/// A heuristic, not ground truth: never reconciled against the server by
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedUploadRecord {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Entry returned by the server listing call. Lives for exactly one fetch
/// cycle; replaced wholesale on refresh, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteFileRecord {
    pub name: String,
    pub size: u64,
    /// Last-modified time as unix seconds.
    pub modified: i64,
    pub url: String,
}

/// Listing endpoint response shape.
#[derive(Debug, Deserialize)]
pub struct RemoteListing {
    pub files: Vec<RemoteFileRecord>,
}

/// Unified presentation shape for both listing sources. All text fields are
/// escaped before they reach rendered output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEntry {
    pub display_name: String,
    pub display_size: String,
    pub display_timestamp: String,
    pub download_href: Option<String>,
}

/// Transfer progress for one in-flight submission.
///
/// An unknown total is an explicit variant, not a 0.0 sentinel, so the
/// consumer can show an indeterminate state instead of "no progress".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Fraction of bytes transferred in [0, 1]; total size known.
    Fraction(f64),
    /// Bytes transferred so far with no known total.
    Indeterminate { bytes_sent: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_from_full_body() {
        let outcome = UploadOutcome::from_value(json!({
            "message": "Processed uploads",
            "count": 4,
            "saved": 3,
            "skipped": 1,
        }));
        assert_eq!(outcome.saved, 3);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.display_message(), "Processed uploads");
    }

    #[test]
    fn outcome_defaults_absent_counts_to_zero() {
        let outcome = UploadOutcome::from_value(json!({ "results": [] }));
        assert_eq!(outcome.saved, 0);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn outcome_derives_message_when_absent() {
        let outcome = UploadOutcome::from_value(json!({ "saved": 2, "skipped": 0 }));
        assert_eq!(outcome.display_message(), "Saved 2, skipped 0");
    }

    #[test]
    fn cached_record_round_trips_as_json() {
        let record = CachedUploadRecord {
            id: Uuid::new_v4(),
            name: "report.pdf".to_string(),
            size: 2048,
            content_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
        };
        let raw = serde_json::to_string(&record).unwrap();
        let back: CachedUploadRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record, back);
    }
}
