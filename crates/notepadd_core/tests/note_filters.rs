use notepadd_core::db::open_db_in_memory;
use notepadd_core::{NoteService, SortOrder, SqliteNoteRepository, TagFilter};
use rusqlite::params;

#[test]
fn search_matches_title_substring_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    service.create_note("Shopping list", "", "body").unwrap();
    service.create_note("Work journal", "", "body").unwrap();

    let hits = service
        .list_notes(Some("shop"), TagFilter::All, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Shopping list");

    let hits = service
        .list_notes(Some("JOURNAL"), TagFilter::All, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Work journal");
}

#[test]
fn search_escapes_like_wildcards() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    service.create_note("100% done", "", "body").unwrap();
    service.create_note("100 done", "", "body").unwrap();

    let hits = service
        .list_notes(Some("100%"), TagFilter::All, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "100% done");
}

#[test]
fn blank_search_matches_everything() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    service.create_note("one", "", "body").unwrap();
    service.create_note("two", "", "body").unwrap();

    let hits = service
        .list_notes(Some("   "), TagFilter::All, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn tag_filter_matches_normalized_tag_and_untagged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    service.create_note("a", "work", "body").unwrap();
    service.create_note("b", "Work", "body").unwrap();
    service.create_note("c", "", "body").unwrap();

    let tagged = service
        .list_notes(None, TagFilter::Named("work".to_string()), SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(tagged.len(), 2);

    let untagged = service
        .list_notes(None, TagFilter::Untagged, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(untagged.len(), 1);
    assert_eq!(untagged[0].title, "c");
}

#[test]
fn sort_follows_creation_time_in_both_directions() {
    let conn = open_db_in_memory().unwrap();
    let (old_id, new_id) = {
        let repo = SqliteNoteRepository::try_new(&conn).unwrap();
        let service = NoteService::new(repo);
        let old = service.create_note("old", "", "body").unwrap();
        let new = service.create_note("new", "", "body").unwrap();
        (old.id, new.id)
    };

    conn.execute(
        "UPDATE notes SET created_at = 1000 WHERE id = ?1;",
        params![old_id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE notes SET created_at = 2000 WHERE id = ?1;",
        params![new_id.to_string()],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let newest_first = service
        .list_notes(None, TagFilter::All, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(newest_first[0].id, new_id);
    assert_eq!(newest_first[1].id, old_id);

    let oldest_first = service
        .list_notes(None, TagFilter::All, SortOrder::OldestFirst)
        .unwrap();
    assert_eq!(oldest_first[0].id, old_id);
    assert_eq!(oldest_first[1].id, new_id);
}

#[test]
fn tag_summary_counts_every_bucket() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    service.create_note("a", "work", "body").unwrap();
    service.create_note("b", "work", "body").unwrap();
    service.create_note("c", "home", "body").unwrap();
    service.create_note("d", "", "body").unwrap();

    let summary = service.tag_summary().unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.untagged, 1);
    assert_eq!(summary.tags.len(), 2);
    assert_eq!(summary.tags[0].tag, "HOME");
    assert_eq!(summary.tags[0].count, 1);
    assert_eq!(summary.tags[1].tag, "WORK");
    assert_eq!(summary.tags[1].count, 2);
}

#[test]
fn clear_tag_moves_notes_to_untagged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    service.create_note("a", "work", "body").unwrap();
    service.create_note("b", "Work", "body").unwrap();
    service.create_note("c", "home", "body").unwrap();

    let touched = service.clear_tag("work").unwrap();
    assert_eq!(touched, 2);

    let untagged = service
        .list_notes(None, TagFilter::Untagged, SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(untagged.len(), 2);

    let still_tagged = service
        .list_notes(None, TagFilter::Named("home".to_string()), SortOrder::NewestFirst)
        .unwrap();
    assert_eq!(still_tagged.len(), 1);
}
