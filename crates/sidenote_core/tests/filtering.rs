use sidenote_core::{
    filter, KeyValueStore, ManualClock, MemoryStore, NoopLayout, Note, NoteStore,
};

fn store_with(entries: &[&str]) -> NoteStore<MemoryStore> {
    let mut store = NoteStore::with_collaborators(
        MemoryStore::new(),
        Box::new(ManualClock::starting_at(0)),
        Box::new(NoopLayout),
    );
    for entry in entries {
        store.add().unwrap();
        store.update(entry).unwrap();
    }
    store
}

fn visibility(store: &NoteStore<MemoryStore>) -> Vec<bool> {
    store.notes().iter().map(|note| note.visible).collect()
}

#[test]
fn title_and_content_both_count_as_matches() {
    // Sequence order: [B, A] after prepending; titles below read [dog, cat].
    let mut store = store_with(&["cat", "dog\ncats are nice"]);

    store.apply_filter("cat");
    assert_eq!(visibility(&store), vec![true, true]);

    store.apply_filter("xyz");
    assert_eq!(visibility(&store), vec![false, false]);
}

#[test]
fn clearing_the_filter_restores_all_notes() {
    let mut store = store_with(&["alpha", "beta", "gamma"]);

    store.apply_filter("alpha");
    assert_eq!(visibility(&store).iter().filter(|v| **v).count(), 1);

    store.apply_filter("");
    assert_eq!(visibility(&store), vec![true, true, true]);

    // Idempotent: clearing again changes nothing.
    store.apply_filter("");
    assert_eq!(visibility(&store), vec![true, true, true]);
}

#[test]
fn filtering_is_case_sensitive() {
    let mut store = store_with(&["Cat pictures"]);

    store.apply_filter("cat");
    assert_eq!(visibility(&store), vec![false]);

    store.apply_filter("Cat");
    assert_eq!(visibility(&store), vec![true]);
}

#[test]
fn filtering_does_not_reorder_remove_or_persist() {
    let mut store = store_with(&["one", "two"]);
    let ids_before: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    let payload_before = store
        .storage()
        .get(sidenote_core::NOTES_KEY)
        .unwrap()
        .unwrap();

    store.apply_filter("one");

    let ids_after: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids_before, ids_after);
    assert_eq!(store.notes().len(), 2);

    // Visibility is transient; the persisted payload is untouched.
    let payload_after = store
        .storage()
        .get(sidenote_core::NOTES_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(payload_before, payload_after);
}

#[test]
fn fresh_blank_note_is_hidden_by_any_query() {
    let mut notes = vec![Note::blank(0)];
    filter::apply(&mut notes, "anything");
    assert!(!notes[0].visible);

    filter::apply(&mut notes, "");
    assert!(notes[0].visible);
}

#[test]
fn visible_notes_iterates_in_sequence_order() {
    let mut store = store_with(&["apple pie", "banana", "apple sauce"]);
    store.apply_filter("apple");

    let titles: Vec<_> = filter::visible_notes(store.notes())
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(titles, vec!["apple sauce", "apple pie"]);
}
