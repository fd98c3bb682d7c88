//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by list and editor flows.
//! - Normalize user-entered title and tag values on construction.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `content` is always Markdown; HTML is a transient editor projection and
//!   is never stored on the model.
//! - `tag` is stored trimmed and upper-cased; the empty string means the
//!   note is untagged.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Validation failure for note construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The nil UUID is reserved and never a valid note identity.
    NilId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be the nil uuid"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical domain record for a single note.
///
/// Timestamps are storage-managed; this shape carries only the fields the
/// caller controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID used for detail navigation and deletion.
    pub id: NoteId,
    /// Display title. Trimmed; may be empty for drafts.
    pub title: String,
    /// Single grouping tag, trimmed and upper-cased. Empty means untagged.
    pub tag: String,
    /// Markdown body.
    pub content: String,
}

impl Note {
    /// Creates a note with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        tag: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: normalize_title(&title.into()),
            tag: normalize_tag(&tag.into()),
            content: content.into(),
        }
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by update paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        tag: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, NoteValidationError> {
        if id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        Ok(Self {
            id,
            title: normalize_title(&title.into()),
            tag: normalize_tag(&tag.into()),
            content: content.into(),
        })
    }

    /// Checks the invariants that must hold before persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        Ok(())
    }

    /// Returns whether this note carries no tag.
    pub fn is_untagged(&self) -> bool {
        self.tag.is_empty()
    }
}

/// Normalizes a display title: surrounding whitespace is dropped.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_string()
}

/// Normalizes a tag value: trimmed, upper-cased, empty stays empty.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_uppercase()
}
