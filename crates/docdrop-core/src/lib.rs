//! Docdrop Core Library
//!
//! This crate provides the domain models, admission policy, selection queue,
//! and configuration shared across all docdrop components.

pub mod admission;
pub mod config;
pub mod models;
pub mod selection;

// Re-export commonly used types
pub use admission::{admit, rejection_warning, Admission, RejectReason};
pub use config::{AppConfig, UploadPolicy};
pub use models::{
    CachedUploadRecord, CandidateFile, DisplayEntry, Progress, RemoteFileRecord, RemoteListing,
    UploadOutcome,
};
pub use selection::SelectionQueue;
