//! Docdrop application layer.
//!
//! The coordinator that sequences selection, submission and reconciliation,
//! the presenter that decides which listing source is current, and the
//! renderer seam toward the page/terminal.

pub mod coordinator;
pub mod presenter;
pub mod renderer;

pub use coordinator::{Tab, UploadCoordinator};
pub use presenter::{escape_html, format_size, Presenter};
pub use renderer::{NoOpRenderer, Renderer};
