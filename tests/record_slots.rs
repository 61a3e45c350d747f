use outreachlog::{
    backend::{TabularBackend, memory::MemoryGrid},
    core::records::{EMAIL_COL, NAME_COL, REFERENCE_COL, RecordStore},
    entry::OutreachEntry,
};

fn entry(name: &str, email: &str, reference: &str) -> OutreachEntry {
    OutreachEntry {
        submitter_name: name.to_string(),
        client_email: email.to_string(),
        reference: reference.to_string(),
        submitted_at_ms: 1,
    }
}

fn opened_store(grid: &mut MemoryGrid) -> RecordStore {
    let store = RecordStore::new("Outreach");
    store.open(grid).expect("open");
    store
}

#[test]
fn first_entry_on_empty_store_lands_on_row_two() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    let row = store
        .save(&mut grid, &entry("Aisha", "A@X.com", "IG @foo"))
        .expect("save");
    assert_eq!(row, 2);

    let cells = grid.read_row("Outreach", 2).expect("read row");
    assert_eq!(cells[NAME_COL - 1], "Aisha");
    assert_eq!(cells[EMAIL_COL - 1], "A@X.com");
    assert_eq!(cells[REFERENCE_COL - 1], "IG @foo");
}

#[test]
fn header_row_is_reserved() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    let header = grid.read_row("Outreach", 1).expect("read header");
    assert_eq!(header[NAME_COL - 1], "Submitter Name");
    assert_eq!(header[EMAIL_COL - 1], "Client Email");

    assert_eq!(store.find_insertion_slot(&grid).expect("slot"), 2);
}

#[test]
fn blanked_row_is_reused_before_appending() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    for i in 0..3 {
        store
            .save(&mut grid, &entry("Aisha", &format!("c{i}@x.com"), ""))
            .expect("save");
    }
    // Rows 2-4 occupied; a human editor clears row 3.
    grid.write_cell("Outreach", 3, NAME_COL, "").expect("blank name");
    grid.write_cell("Outreach", 3, EMAIL_COL, "").expect("blank email");

    assert_eq!(store.find_insertion_slot(&grid).expect("slot"), 3);

    let row = store
        .save(&mut grid, &entry("Omar", "new@x.com", "YT"))
        .expect("save");
    assert_eq!(row, 3);
    assert_eq!(grid.read_all("Outreach").expect("read all").len(), 4);

    let cells = grid.read_row("Outreach", 3).expect("read row");
    assert_eq!(cells[NAME_COL - 1], "Omar");
    assert_eq!(cells[EMAIL_COL - 1], "new@x.com");
}

#[test]
fn appends_when_no_row_is_blank() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    for i in 0..3 {
        store
            .save(&mut grid, &entry("Aisha", &format!("c{i}@x.com"), ""))
            .expect("save");
    }

    let row = store
        .save(&mut grid, &entry("Aisha", "c3@x.com", ""))
        .expect("save");
    assert_eq!(row, 5);
}

#[test]
fn exists_matches_any_case_and_surrounding_whitespace() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    store
        .save(&mut grid, &entry("Aisha", "A@X.com", ""))
        .expect("save");

    assert!(store.exists(&grid, "a@x.com ").expect("exists"));
    assert!(store.exists(&grid, "  A@X.COM").expect("exists"));
    assert!(!store.exists(&grid, "b@x.com").expect("exists"));
}

#[test]
fn exists_ignores_blank_cells_and_blank_candidates() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    store
        .save(&mut grid, &entry("Aisha", "a@x.com", ""))
        .expect("save");
    grid.write_cell("Outreach", 2, EMAIL_COL, "  ").expect("blank email");

    assert!(!store.exists(&grid, "a@x.com").expect("exists"));
    assert!(!store.exists(&grid, "   ").expect("exists"));
}

#[test]
fn row_reuse_preserves_out_of_core_columns() {
    let mut grid = MemoryGrid::new();
    let store = opened_store(&mut grid);

    store
        .save(&mut grid, &entry("Aisha", "a@x.com", "IG"))
        .expect("save");
    // Columns A and D are populated outside this core (e.g. a date stamp).
    grid.write_cell("Outreach", 2, 1, "2026-08-30").expect("col A");
    grid.write_cell("Outreach", 2, 4, "warm lead").expect("col D");

    grid.write_cell("Outreach", 2, NAME_COL, "").expect("blank name");
    grid.write_cell("Outreach", 2, EMAIL_COL, "").expect("blank email");

    let row = store
        .save(&mut grid, &entry("Omar", "b@x.com", "YT"))
        .expect("save");
    assert_eq!(row, 2);

    let cells = grid.read_row("Outreach", 2).expect("read row");
    assert_eq!(cells[0], "2026-08-30");
    assert_eq!(cells[3], "warm lead");
    assert_eq!(cells[NAME_COL - 1], "Omar");
}
