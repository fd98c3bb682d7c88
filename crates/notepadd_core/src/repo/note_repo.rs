//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and list-screen query APIs over `notes` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Note::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `updated_at` is refreshed by every mutating statement.

use crate::db::DbError;
use crate::model::note::{normalize_tag, Note, NoteId, NoteValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    tag,
    content,
    created_at,
    updated_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(NoteValidationError),
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read model for note list/detail use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    /// Stable note id.
    pub id: NoteId,
    /// Display title as persisted (already trimmed).
    pub title: String,
    /// Upper-cased tag; empty when untagged.
    pub tag: String,
    /// Raw markdown source text.
    pub content: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Update timestamp in epoch milliseconds.
    pub updated_at: i64,
}

/// Creation-date ordering for the list screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently created note first.
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Tag constraint for the list screen's filter drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    /// No tag constraint.
    #[default]
    All,
    /// Only notes whose tag is the empty string.
    Untagged,
    /// Exact match against one normalized tag.
    Named(String),
}

/// Query options for note list use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Case-insensitive substring match against the title.
    pub search: Option<String>,
    /// Tag constraint.
    pub tag: TagFilter,
    /// Creation-date ordering.
    pub sort: SortOrder,
}

/// Per-tag note count for the filter drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    /// Normalized tag value; empty string for untagged notes.
    pub tag: String,
    pub count: u32,
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Persists one new note and returns its stable id.
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title, tag and content of an existing note.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>>;
    /// Lists notes using search/tag filters and creation-date ordering.
    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteRecord>>;
    /// Deletes one note by id.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Deletes many notes at once; returns the number of rows removed.
    fn delete_notes(&self, ids: &[NoteId]) -> RepoResult<usize>;
    /// Detaches every note carrying `tag`; returns the number of rows touched.
    fn clear_tag(&self, tag: &str) -> RepoResult<usize>;
    /// Returns per-tag note counts sorted by tag name.
    fn tag_counts(&self) -> RepoResult<Vec<TagCount>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (id, title, tag, content, created_at, updated_at)
             VALUES (
                ?1, ?2, ?3, ?4,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
             );",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.tag.as_str(),
                note.content.as_str(),
            ],
        )?;

        Ok(note.id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                tag = ?3,
                content = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.tag.as_str(),
                note.content.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteRecord>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(term) = query.search.as_ref() {
            let term = term.trim();
            if !term.is_empty() {
                // SQLite LIKE folds ASCII case, matching the list screen's
                // search behavior.
                sql.push_str(" AND title LIKE ? ESCAPE '\\'");
                bind_values.push(Value::Text(like_pattern(term)));
            }
        }

        match &query.tag {
            TagFilter::All => {}
            TagFilter::Untagged => sql.push_str(" AND tag = ''"),
            TagFilter::Named(tag) => {
                sql.push_str(" AND tag = ?");
                bind_values.push(Value::Text(normalize_tag(tag)));
            }
        }

        match query.sort {
            SortOrder::NewestFirst => sql.push_str(" ORDER BY created_at DESC, id ASC"),
            SortOrder::OldestFirst => sql.push_str(" ORDER BY created_at ASC, id ASC"),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_notes(&self, ids: &[NoteId]) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM notes WHERE id IN ({placeholders});");
        let bind_values = ids.iter().map(|id| Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }

    fn clear_tag(&self, tag: &str) -> RepoResult<usize> {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return Ok(0);
        }

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                tag = '',
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE tag = ?1;",
            [normalized.as_str()],
        )?;
        Ok(changed)
    }

    fn tag_counts(&self) -> RepoResult<Vec<TagCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT tag, COUNT(*) AS note_count
             FROM notes
             GROUP BY tag
             ORDER BY tag ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next()? {
            counts.push(TagCount {
                tag: row.get("tag")?,
                count: row.get("note_count")?,
            });
        }
        Ok(counts)
    }
}

/// Builds a LIKE pattern matching `term` anywhere, with wildcards escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<NoteRecord> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id")))?;

    Ok(NoteRecord {
        id,
        title: row.get("title")?,
        tag: row.get("tag")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }

    for column in ["id", "title", "tag", "content", "created_at", "updated_at"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
