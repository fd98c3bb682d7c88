use notepadd_core::db::open_db_in_memory;
use notepadd_core::{
    EditorService, NoteService, NoteServiceError, SqliteNoteRepository, UNTITLED_FALLBACK,
};
use uuid::Uuid;

#[test]
fn begin_edit_projects_stored_markdown_into_html() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let editor = EditorService::new(NoteService::new(repo));

    let created = editor
        .notes()
        .create_note("Plan", "work", "# Plan\n\n- item")
        .unwrap();

    let session = editor.begin_edit(created.id).unwrap();
    assert_eq!(session.note_id, created.id);
    assert_eq!(session.title, "Plan");
    assert_eq!(session.tag, "WORK");
    assert_eq!(session.html, "<h1>Plan</h1><ul><li>item</li></ul>");
}

#[test]
fn begin_edit_of_missing_note_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let editor = EditorService::new(NoteService::new(repo));

    let err = editor.begin_edit(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
}

#[test]
fn save_edit_persists_editor_html_as_markdown() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let editor = EditorService::new(NoteService::new(repo));

    let created = editor
        .notes()
        .create_note("Plan", "work", "# Plan\n\nold")
        .unwrap();

    let saved = editor
        .save_edit(
            created.id,
            "Plan",
            "work",
            "<h1>Plan</h1><p>Updated <strong>now</strong></p>",
        )
        .unwrap();
    assert_eq!(saved.content, "# Plan\n\nUpdated **now**");

    // The durable form is markdown; no tag text reaches storage.
    let loaded = editor.notes().get_note(created.id).unwrap().unwrap();
    assert!(!loaded.content.contains('<'));
}

#[test]
fn save_new_creates_a_note_from_editor_html() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let editor = EditorService::new(NoteService::new(repo));

    let created = editor.save_new("", "", "<p>Quick thought</p>").unwrap();
    assert_eq!(created.title, UNTITLED_FALLBACK);
    assert_eq!(created.content, "Quick thought");
}

#[test]
fn edit_session_roundtrip_is_stable_for_unchanged_content() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let editor = EditorService::new(NoteService::new(repo));

    let source = "# Notes\n\nSome **bold** text.\n\n- one\n- two";
    let created = editor.notes().create_note("Notes", "", source).unwrap();

    // Open the editor and save without touching the HTML.
    let session = editor.begin_edit(created.id).unwrap();
    let saved = editor
        .save_edit(created.id, &session.title, &session.tag, &session.html)
        .unwrap();

    assert_eq!(saved.content, source);
}
