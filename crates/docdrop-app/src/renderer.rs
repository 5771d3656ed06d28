//! Output seam toward the page/terminal.
//!
//! The coordinator emits render requests through this trait; no markup shape
//! is part of the contract. Implementations must be `Send + Sync` because
//! progress observations arrive from inside the transport's body stream.

use docdrop_core::models::{CandidateFile, DisplayEntry, Progress};

pub trait Renderer: Send + Sync {
    /// Current selection, in queue order.
    fn render_selection(&self, files: &[CandidateFile]);

    /// Admission warnings for the most recent batch of selected files.
    fn render_warnings(&self, warnings: &[String]);

    /// The reconciled "my uploads" listing.
    fn render_uploads(&self, entries: &[DisplayEntry]);

    /// Transfer progress for the in-flight submission.
    fn render_progress(&self, progress: Progress);

    /// Completion message for a successful submission. Already escaped.
    fn render_upload_result(&self, message: &str);

    /// Failed-upload state; the selection is left intact for manual retry.
    fn render_upload_failed(&self, message: &str);

    /// Re-derived "submit enabled" condition after every mutation.
    fn set_submit_enabled(&self, enabled: bool);
}

/// Renderer that drops every request. Useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpRenderer;

impl Renderer for NoOpRenderer {
    fn render_selection(&self, _files: &[CandidateFile]) {}
    fn render_warnings(&self, _warnings: &[String]) {}
    fn render_uploads(&self, _entries: &[DisplayEntry]) {}
    fn render_progress(&self, _progress: Progress) {}
    fn render_upload_result(&self, _message: &str) {}
    fn render_upload_failed(&self, _message: &str) {}
    fn set_submit_enabled(&self, _enabled: bool) {}
}
