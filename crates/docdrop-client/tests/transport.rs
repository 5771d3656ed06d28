//! Transport tests against a mock HTTP server.

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use docdrop_client::{ApiClient, ListingError, ProgressObserver, TransportError, UploadPart};
use docdrop_core::models::{CandidateFile, Progress};
use std::sync::{Arc, Mutex};

fn candidate(name: &str, payload: &[u8]) -> CandidateFile {
    CandidateFile {
        name: name.to_string(),
        size: payload.len() as u64,
        content_type: "application/pdf".to_string(),
        last_modified: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        data: Bytes::copy_from_slice(payload),
    }
}

fn parts_for(candidates: &[CandidateFile]) -> Vec<UploadPart> {
    candidates.iter().map(UploadPart::from_candidate).collect()
}

fn observer_into(sink: Arc<Mutex<Vec<Progress>>>) -> ProgressObserver {
    Arc::new(move |p| sink.lock().unwrap().push(p))
}

fn silent_observer() -> ProgressObserver {
    Arc::new(|_| {})
}

#[tokio::test]
async fn submit_parses_saved_and_skipped_counts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header(
            "content-type",
            mockito::Matcher::Regex("multipart/form-data.*".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Processed uploads","count":4,"saved":3,"skipped":1}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let batch = vec![
        candidate("a.pdf", b"aaaa"),
        candidate("b.pdf", b"bbbb"),
        candidate("c.pdf", b"cccc"),
        candidate("d.pdf", b"dddd"),
    ];

    let outcome = client
        .submit(parts_for(&batch), silent_observer())
        .await
        .unwrap();

    assert_eq!(outcome.saved, 3);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.display_message(), "Processed uploads");
    mock.assert_async().await;
}

#[tokio::test]
async fn submit_with_unparseable_body_resolves_to_default_outcome() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/upload")
        .with_status(200)
        .with_body("<html>ok</html>")
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let outcome = client
        .submit(parts_for(&[candidate("a.pdf", b"data")]), silent_observer())
        .await
        .unwrap();

    assert_eq!(outcome.saved, 0);
    assert_eq!(outcome.skipped, 0);
}

#[tokio::test]
async fn submit_http_failure_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/upload")
        .with_status(500)
        .with_body("storage unavailable")
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let err = client
        .submit(parts_for(&[candidate("a.pdf", b"data")]), silent_observer())
        .await
        .unwrap_err();

    match err {
        TransportError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "storage unavailable");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn submit_network_failure_is_distinguishable() {
    // Nothing listens here; the connection itself fails.
    let client = ApiClient::new("http://127.0.0.1:9".to_string()).unwrap();
    let err = client
        .submit(parts_for(&[candidate("a.pdf", b"data")]), silent_observer())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn submit_reports_monotone_progress_up_to_completion() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"saved":2,"skipped":0}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let batch = vec![
        candidate("a.pdf", &[1u8; 100_000]),
        candidate("b.pdf", &[2u8; 100_000]),
    ];

    client
        .submit(parts_for(&batch), observer_into(Arc::clone(&seen)))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    let mut last = -1.0;
    for p in seen.iter() {
        match p {
            Progress::Fraction(f) => {
                assert!(*f >= last, "progress regressed: {f} < {last}");
                assert!(*f <= 1.0);
                last = *f;
            }
            Progress::Indeterminate { .. } => panic!("batch total was known"),
        }
    }
    assert_eq!(last, 1.0);
}

#[tokio::test]
async fn fetch_listing_returns_remote_records() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/upload/files")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"files":[
                {"name":"a.pdf","size":1000,"modified":1700000000,"url":"/files/a.pdf"},
                {"name":"b.pdf","size":2000,"modified":1700000100,"url":"/files/b.pdf"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let files = client.fetch_listing().await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "a.pdf");
    assert_eq!(files[1].size, 2000);
}

#[tokio::test]
async fn fetch_listing_with_zero_entries_is_ok() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/upload/files")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"files":[]}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let files = client.fetch_listing().await.unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn fetch_listing_maps_failures_to_listing_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/upload/files")
        .with_status(503)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let err = client.fetch_listing().await.unwrap_err();
    assert!(matches!(err, ListingError::Http { status: 503 }));
}

#[tokio::test]
async fn fetch_listing_malformed_body_is_a_listing_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/upload/files")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let err = client.fetch_listing().await.unwrap_err();
    assert!(matches!(err, ListingError::Malformed(_)));
}
