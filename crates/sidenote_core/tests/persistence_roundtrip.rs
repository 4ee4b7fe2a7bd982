use sidenote_core::{
    decode_notes, encode_notes, KeyValueStore, ManualClock, MemoryStore, NoopLayout, Note,
    NoteStore, NOTES_KEY,
};

fn note(title: &str, content: &str, last_edit: i64) -> Note {
    let mut note = Note::blank(last_edit);
    note.title = title.to_string();
    note.content = content.to_string();
    note
}

fn sample_notes(count: usize) -> Vec<Note> {
    (0..count)
        .map(|index| {
            note(
                &format!("title {index}"),
                &format!("body line\nnumber {index}"),
                1_000 + index as i64,
            )
        })
        .collect()
}

#[test]
fn roundtrip_preserves_fields_and_order() {
    for count in [1, 3, 10] {
        let original = sample_notes(count);
        let payload = encode_notes(&original).unwrap();
        let decoded = decode_notes(&payload).unwrap();

        assert_eq!(decoded.len(), count);
        for (left, right) in original.iter().zip(&decoded) {
            assert_eq!(left.id, right.id);
            assert_eq!(left.title, right.title);
            assert_eq!(left.content, right.content);
            assert_eq!(left.last_edit, right.last_edit);
        }
    }
}

#[test]
fn visible_does_not_roundtrip_and_defaults_to_true() {
    let mut hidden = note("hidden", "body", 1);
    hidden.visible = false;

    let payload = encode_notes(&[hidden]).unwrap();
    assert!(!payload.contains("visible"));

    let decoded = decode_notes(&payload).unwrap();
    assert!(decoded[0].visible);
}

#[test]
fn legacy_payload_without_ids_still_loads() {
    // The shape the persistence area held before notes carried ids.
    let payload = r#"[
        {"title":"cat","content":"","lastEdit":100},
        {"title":"dog","content":"cats are nice","lastEdit":200}
    ]"#;

    let decoded = decode_notes(payload).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_ne!(decoded[0].id, decoded[1].id);
    assert_eq!(decoded[0].title, "cat");
    assert_eq!(decoded[1].content, "cats are nice");
}

fn test_store(storage: MemoryStore) -> NoteStore<MemoryStore> {
    NoteStore::with_collaborators(
        storage,
        Box::new(ManualClock::starting_at(5_000)),
        Box::new(NoopLayout),
    )
}

#[test]
fn store_session_roundtrips_through_storage() {
    let mut first = test_store(MemoryStore::new());
    first.load();
    first.update("Groceries\nmilk\neggs").unwrap();
    first.add().unwrap();
    first.update("Ideas\nwrite more tests").unwrap();

    let payload = first.storage().get(NOTES_KEY).unwrap().unwrap();
    let mut seeded = MemoryStore::new();
    seeded.set(NOTES_KEY, &payload).unwrap();

    let mut second = test_store(seeded);
    second.load();

    let notes = second.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "Ideas");
    assert_eq!(notes[1].title, "Groceries");
    assert_eq!(notes[1].content, "milk\neggs");
    assert_eq!(second.active_id(), Some(second.notes()[0].id));
}

#[test]
fn malformed_payload_falls_back_to_fresh_blank_note() {
    let mut seeded = MemoryStore::new();
    seeded.set(NOTES_KEY, "definitely { not json").unwrap();

    let mut store = test_store(seeded);
    store.load();

    let notes = store.notes();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].title.is_empty());

    // The fallback note replaced the malformed payload in storage.
    let payload = store.storage().get(NOTES_KEY).unwrap().unwrap();
    assert!(decode_notes(&payload).is_ok());
}

#[test]
fn empty_array_payload_also_falls_back() {
    let mut seeded = MemoryStore::new();
    seeded.set(NOTES_KEY, "[]").unwrap();

    let mut store = test_store(seeded);
    store.load();

    let notes = store.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(store.active_id(), Some(notes[0].id));
}
