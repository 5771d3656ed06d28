//! Admission policy for candidate files.
//!
//! Pure predicate logic deciding whether a candidate may enter the selection
//! set. Rejections are warnings, never errors: the batch continues with the
//! remaining files.

use crate::config::UploadPolicy;
use crate::models::CandidateFile;
use crate::selection::SelectionQueue;

/// Why a candidate was refused admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The (name, size, last_modified) tuple is already in the queue.
    Duplicate,
    /// Declared content type is not in the allowed set.
    DisallowedType,
    /// Declared size exceeds the byte ceiling.
    TooLarge,
}

/// Admission decision for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected(RejectReason),
}

/// Decide whether a candidate may enter the selection set.
///
/// Checks run in order: duplicate, content type, size. A file failing more
/// than one check is reported for the first failing reason only (type before
/// size), matching the behavior users already see.
pub fn admit(
    candidate: &CandidateFile,
    queue: &SelectionQueue,
    policy: &UploadPolicy,
) -> Admission {
    if queue.contains_identity(candidate) {
        return Admission::Rejected(RejectReason::Duplicate);
    }
    if !policy.allows_content_type(&candidate.content_type) {
        return Admission::Rejected(RejectReason::DisallowedType);
    }
    if candidate.size > policy.max_file_size_bytes {
        return Admission::Rejected(RejectReason::TooLarge);
    }
    Admission::Admitted
}

/// Human-readable warning for a rejected candidate.
pub fn rejection_warning(name: &str, reason: RejectReason) -> String {
    match reason {
        RejectReason::Duplicate => format!("{} is already selected", name),
        RejectReason::DisallowedType => format!("{} has an unsupported file type", name),
        RejectReason::TooLarge => format!("{} exceeds the maximum file size", name),
    }
}
