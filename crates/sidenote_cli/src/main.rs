//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sidenote_core` linkage.
//! - Drive one in-memory note session end to end with deterministic
//!   output for quick local sanity checks.

use sidenote_core::{
    filter, list_row, ManualClock, MemoryStore, NoopLayout, NoteStore, StoreResult,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("sidenote_cli failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> StoreResult<()> {
    println!("sidenote_core ping={}", sidenote_core::ping());
    println!("sidenote_core version={}", sidenote_core::core_version());

    // Deterministic clock keeps the probe output stable across runs.
    let mut store = NoteStore::with_collaborators(
        MemoryStore::new(),
        Box::new(ManualClock::starting_at(0)),
        Box::new(NoopLayout),
    );

    store.load();
    store.update("Groceries\nmilk\neggs")?;
    store.add()?;
    store.update("Ideas\nlearn some Rust")?;

    store.apply_filter("milk");
    let matching = filter::visible_notes(store.notes()).count();
    println!("filter=milk visible={matching}");

    store.apply_filter("");
    for note in store.notes() {
        let row = list_row(note);
        println!("note title={} preview={}", row.title, row.preview);
    }

    let first_id = store.notes()[0].id;
    store.delete(first_id)?;
    println!("after delete count={}", store.notes().len());

    Ok(())
}
