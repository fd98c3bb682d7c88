//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/get/list/delete APIs for the screens.
//! - Apply the save rules the detail screen expects (blank-note rejection,
//!   untitled fallback).
//! - Shape the filter drawer's tag summary.
//!
//! # Invariants
//! - Updates use full content replacement semantics.
//! - Stored titles and tags are always in normalized form.

use crate::model::note::{normalize_title, Note, NoteId};
use crate::repo::note_repo::{
    NoteListQuery, NoteRecord, NoteRepository, RepoError, RepoResult, SortOrder, TagCount,
    TagFilter,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title stored when a note is saved without one.
pub const UNTITLED_FALLBACK: &str = "Untitled";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Both title and content are blank; there is nothing to save.
    EmptyNote,
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "note has no title and no content"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Tag overview for the filter drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    /// Total number of notes.
    pub total: u32,
    /// Number of notes without a tag.
    pub untagged: u32,
    /// Named tags with their note counts, sorted by tag name.
    pub tags: Vec<TagCount>,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from markdown content.
    ///
    /// # Contract
    /// - A note with blank title and blank content is rejected.
    /// - A blank title alone falls back to [`UNTITLED_FALLBACK`].
    pub fn create_note(
        &self,
        title: &str,
        tag: &str,
        content: &str,
    ) -> Result<NoteRecord, NoteServiceError> {
        reject_blank(title, content)?;

        let note = Note::new(effective_title(title), tag, content);
        let id = self.repo.insert_note(&note)?;
        info!("event=note_create module=service status=ok id={id}");

        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Replaces title, tag and content of an existing note.
    pub fn update_note(
        &self,
        id: NoteId,
        title: &str,
        tag: &str,
        content: &str,
    ) -> Result<NoteRecord, NoteServiceError> {
        reject_blank(title, content)?;

        let note = Note::with_id(id, effective_title(title), tag, content)
            .map_err(RepoError::from)?;
        self.repo.update_note(&note)?;

        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Gets one note by stable ID.
    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>> {
        self.repo.get_note(id)
    }

    /// Lists notes for the list screen.
    pub fn list_notes(
        &self,
        search: Option<&str>,
        tag: TagFilter,
        sort: SortOrder,
    ) -> RepoResult<Vec<NoteRecord>> {
        let query = NoteListQuery {
            search: search.map(str::to_string),
            tag,
            sort,
        };
        self.repo.list_notes(&query)
    }

    /// Deletes one note by stable ID.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes the selection-mode batch; returns how many rows were removed.
    pub fn delete_notes(&self, ids: &[NoteId]) -> RepoResult<usize> {
        let removed = self.repo.delete_notes(ids)?;
        info!(
            "event=note_delete_bulk module=service status=ok requested={} removed={removed}",
            ids.len()
        );
        Ok(removed)
    }

    /// Removes a tag from every note carrying it.
    pub fn clear_tag(&self, tag: &str) -> RepoResult<usize> {
        self.repo.clear_tag(tag)
    }

    /// Builds the filter drawer overview from per-tag counts.
    pub fn tag_summary(&self) -> RepoResult<TagSummary> {
        let counts = self.repo.tag_counts()?;

        let total = counts.iter().map(|entry| entry.count).sum();
        let untagged = counts
            .iter()
            .find(|entry| entry.tag.is_empty())
            .map_or(0, |entry| entry.count);
        let tags = counts
            .into_iter()
            .filter(|entry| !entry.tag.is_empty())
            .collect();

        Ok(TagSummary {
            total,
            untagged,
            tags,
        })
    }
}

/// Applies the detail screen's title fallback.
fn effective_title(title: &str) -> String {
    let normalized = normalize_title(title);
    if normalized.is_empty() {
        UNTITLED_FALLBACK.to_string()
    } else {
        normalized
    }
}

fn reject_blank(title: &str, content: &str) -> Result<(), NoteServiceError> {
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err(NoteServiceError::EmptyNote);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{effective_title, reject_blank, NoteServiceError, UNTITLED_FALLBACK};

    #[test]
    fn blank_title_falls_back_to_untitled() {
        assert_eq!(effective_title("   "), UNTITLED_FALLBACK);
        assert_eq!(effective_title(" groceries "), "groceries");
    }

    #[test]
    fn blank_title_and_content_are_rejected() {
        assert!(matches!(
            reject_blank("  ", "\n"),
            Err(NoteServiceError::EmptyNote)
        ));
        assert!(reject_blank("", "body").is_ok());
        assert!(reject_blank("title", "").is_ok());
    }
}
