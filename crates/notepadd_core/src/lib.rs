//! Core domain logic for notepadd.
//! This crate is the single source of truth for note business invariants,
//! including the Markdown <-> HTML conversion used by the rich editor.

pub mod convert;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use convert::{html_to_markdown, markdown_to_html};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::note_repo::{
    NoteListQuery, NoteRecord, NoteRepository, RepoError, RepoResult, SortOrder,
    SqliteNoteRepository, TagCount, TagFilter,
};
pub use service::editor_service::{EditSession, EditorService};
pub use service::note_service::{NoteService, NoteServiceError, TagSummary, UNTITLED_FALLBACK};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
