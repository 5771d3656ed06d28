//! Ordered selection of validated candidate files awaiting submission.

use crate::admission::{admit, rejection_warning, Admission};
use crate::config::UploadPolicy;
use crate::models::CandidateFile;

/// Ordered, mutable collection of candidates. Insertion order is display
/// order. Invariant: no two elements share the (name, size, last_modified)
/// deduplication tuple — enforced by routing every append through the
/// admission policy.
#[derive(Debug, Default)]
pub struct SelectionQueue {
    files: Vec<CandidateFile>,
}

impl SelectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether a file with the same deduplication tuple is already queued.
    pub fn contains_identity(&self, candidate: &CandidateFile) -> bool {
        self.files
            .iter()
            .any(|f| f.identity() == candidate.identity())
    }

    /// Admission-gated append. The candidate is dropped on rejection.
    pub fn add(&mut self, file: CandidateFile, policy: &UploadPolicy) -> Admission {
        let decision = admit(&file, self, policy);
        if decision == Admission::Admitted {
            self.files.push(file);
        }
        decision
    }

    /// Admit a whole batch in input order, collecting a warning per rejected
    /// file. Rejected files are silently excluded from the queue.
    pub fn add_all(&mut self, files: Vec<CandidateFile>, policy: &UploadPolicy) -> Vec<String> {
        let mut warnings = Vec::new();
        for file in files {
            let name = file.name.clone();
            if let Admission::Rejected(reason) = self.add(file, policy) {
                warnings.push(rejection_warning(&name, reason));
            }
        }
        warnings
    }

    /// Remove the element at `index`. Out-of-bounds indices are a no-op: the
    /// caller's index may come from a rendered snapshot that has gone stale.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Current ordered snapshot, not a live reference.
    pub fn list(&self) -> Vec<CandidateFile> {
        self.files.clone()
    }
}
