//! Domain model for the note-taking core.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one note-centric shape shared by list, editor and storage flows.
//!
//! # Invariants
//! - Every domain object is identified by a stable `NoteId`.
//! - Stored content is Markdown; HTML exists only inside an edit session.

pub mod note;
