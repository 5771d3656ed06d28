//! The upload coordinator: wires admission, selection, transport, cache and
//! presentation behind the imperative entry points the view layer calls.
//!
//! Constructed once at startup and passed by reference to the view layer; no
//! ambient global. At most one submission is in flight at a time, guarded by
//! the `in_flight` flag that also drives the "submit enabled" condition.

use chrono::Utc;
use docdrop_client::{ApiClient, ProgressObserver, UploadPart};
use docdrop_core::config::UploadPolicy;
use docdrop_core::models::{CachedUploadRecord, CandidateFile, DisplayEntry};
use docdrop_core::selection::SelectionQueue;
use docdrop_store::{StateStore, UploadCache};
use std::sync::Arc;
use uuid::Uuid;

use crate::presenter::{escape_html, Presenter};
use crate::renderer::Renderer;

/// Views the coordinator can be asked to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// File selection and submission.
    Selection,
    /// The reconciled "my uploads" listing.
    MyUploads,
}

pub struct UploadCoordinator<S: StateStore> {
    policy: UploadPolicy,
    queue: SelectionQueue,
    client: ApiClient,
    cache: UploadCache<S>,
    presenter: Presenter,
    renderer: Arc<dyn Renderer>,
    in_flight: bool,
}

impl<S: StateStore> UploadCoordinator<S> {
    pub fn new(
        policy: UploadPolicy,
        client: ApiClient,
        cache: UploadCache<S>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            policy,
            queue: SelectionQueue::new(),
            client,
            cache,
            presenter: Presenter::new(),
            renderer,
            in_flight: false,
        }
    }

    /// User picked files. Admission-gate each one, report warnings for the
    /// rejects, re-render the selection.
    pub fn on_files_selected(&mut self, files: Vec<CandidateFile>) {
        let warnings = self.queue.add_all(files, &self.policy);
        if !warnings.is_empty() {
            tracing::debug!(count = warnings.len(), "files rejected at admission");
            let escaped: Vec<String> = warnings.iter().map(|w| escape_html(w)).collect();
            self.renderer.render_warnings(&escaped);
        }
        self.render_selection();
    }

    /// User asked to drop one queued file. The index may come from a stale
    /// rendered snapshot; out-of-bounds is a no-op.
    pub fn on_remove_requested(&mut self, index: usize) {
        self.queue.remove_at(index);
        self.render_selection();
    }

    /// User switched tabs. Activating the uploads view triggers one listing
    /// refresh and a re-render of the reconciled list.
    pub async fn on_tab_activated(&mut self, tab: Tab) {
        match tab {
            Tab::Selection => self.render_selection(),
            Tab::MyUploads => {
                self.refresh().await;
                self.render_uploads();
            }
        }
    }

    /// Submit the whole queue as one batch. No-op while a submission is in
    /// flight or the queue is empty. On success the submitted files' metadata
    /// are appended to the local cache and the queue is cleared; on failure
    /// the queue is left intact so the user may retry manually. The submit
    /// control is re-enabled on every path.
    pub async fn on_submit(&mut self) {
        if self.in_flight || self.queue.is_empty() {
            return;
        }
        self.in_flight = true;
        self.renderer.set_submit_enabled(false);

        let batch = self.queue.list();
        let parts: Vec<UploadPart> = batch.iter().map(UploadPart::from_candidate).collect();

        let progress_renderer = Arc::clone(&self.renderer);
        let observer: ProgressObserver = Arc::new(move |p| progress_renderer.render_progress(p));

        match self.client.submit(parts, observer).await {
            Ok(outcome) => {
                tracing::info!(
                    batch_size = batch.len(),
                    saved = outcome.saved,
                    skipped = outcome.skipped,
                    "upload batch accepted"
                );
                // All submitted files are recorded; the server does not say
                // which specific ones it skipped.
                let uploaded_at = Utc::now();
                let records: Vec<CachedUploadRecord> = batch
                    .iter()
                    .map(|f| CachedUploadRecord {
                        id: Uuid::new_v4(),
                        name: f.name.clone(),
                        size: f.size,
                        content_type: f.content_type.clone(),
                        uploaded_at,
                    })
                    .collect();
                if let Err(e) = self.cache.append(&records) {
                    tracing::warn!(error = %e, "failed to persist upload records");
                }
                self.queue.clear();
                self.renderer
                    .render_upload_result(&escape_html(&outcome.display_message()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload batch failed");
                self.renderer
                    .render_upload_failed(&escape_html(&format!("Upload failed: {}", e)));
            }
        }

        self.in_flight = false;
        self.render_selection();
    }

    /// One fetch of the server listing. Failure degrades to "no remote data
    /// available", leaving the cached sequence effective.
    pub async fn refresh(&mut self) {
        match self.client.fetch_listing().await {
            Ok(files) => {
                tracing::debug!(count = files.len(), "remote listing refreshed");
                self.presenter.set_remote(files);
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing fetch failed, keeping cached view");
            }
        }
    }

    /// The reconciled listing: remote once fetched, cached otherwise.
    pub fn current_list(&self) -> Vec<DisplayEntry> {
        self.presenter.current_list(&self.cache.load_all())
    }

    pub fn selection_len(&self) -> usize {
        self.queue.len()
    }

    pub fn submission_in_flight(&self) -> bool {
        self.in_flight
    }

    fn render_selection(&self) {
        self.renderer.render_selection(&self.queue.list());
        self.renderer
            .set_submit_enabled(!self.queue.is_empty() && !self.in_flight);
    }

    fn render_uploads(&self) {
        self.renderer.render_uploads(&self.current_list());
    }
}
