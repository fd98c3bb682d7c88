//! Rich-editor session bridge.
//!
//! # Responsibility
//! - Hand the rich-text surface an HTML projection of a stored note.
//! - Persist the surface's final HTML back as Markdown on save.
//!
//! # Invariants
//! - Markdown is the only durable form; the HTML held by a session is
//!   derived and never written to storage.
//! - Log events carry metadata (lengths, ids) only, never note text.

use crate::convert::{html_to_markdown, markdown_to_html};
use crate::model::note::NoteId;
use crate::repo::note_repo::{NoteRecord, NoteRepository};
use crate::service::note_service::{NoteService, NoteServiceError};
use log::debug;

/// One open rich-edit session for a stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Stable id of the note being edited.
    pub note_id: NoteId,
    pub title: String,
    pub tag: String,
    /// HTML fragment to load into the rich-text surface.
    pub html: String,
}

/// Editor facade wiring the conversion core to note persistence.
pub struct EditorService<R: NoteRepository> {
    notes: NoteService<R>,
}

impl<R: NoteRepository> EditorService<R> {
    /// Creates an editor service on top of a note service.
    pub fn new(notes: NoteService<R>) -> Self {
        Self { notes }
    }

    /// Returns the underlying note service for list/detail use-cases.
    pub fn notes(&self) -> &NoteService<R> {
        &self.notes
    }

    /// Opens a rich-edit session for an existing note.
    pub fn begin_edit(&self, id: NoteId) -> Result<EditSession, NoteServiceError> {
        let record = self
            .notes
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))?;

        let html = markdown_to_html(&record.content);
        debug!(
            "event=edit_begin module=editor status=ok id={id} markdown_len={} html_len={}",
            record.content.len(),
            html.len()
        );

        Ok(EditSession {
            note_id: record.id,
            title: record.title,
            tag: record.tag,
            html,
        })
    }

    /// Saves the final editor HTML over an existing note.
    pub fn save_edit(
        &self,
        id: NoteId,
        title: &str,
        tag: &str,
        html: &str,
    ) -> Result<NoteRecord, NoteServiceError> {
        let markdown = html_to_markdown(html);
        debug!(
            "event=edit_save module=editor status=ok id={id} html_len={} markdown_len={}",
            html.len(),
            markdown.len()
        );
        self.notes.update_note(id, title, tag, &markdown)
    }

    /// Saves editor HTML as a brand new note.
    pub fn save_new(
        &self,
        title: &str,
        tag: &str,
        html: &str,
    ) -> Result<NoteRecord, NoteServiceError> {
        let markdown = html_to_markdown(html);
        self.notes.create_note(title, tag, &markdown)
    }
}
