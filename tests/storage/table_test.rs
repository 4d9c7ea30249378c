use std::fs;

use mysqlite::{
    storage::table::{Table, stored_length},
    types::{
        PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_ROWS, error::DatabaseError, row::Row,
    },
    utils::mock::TempDatabase,
};

fn create_user_row(id: u32) -> Row {
    Row::new(id, format!("user{}", id), format!("person{}@example.com", id)).unwrap()
}

fn fill_table(table: &mut Table, count: usize) -> Vec<Row> {
    let rows: Vec<Row> = (0..count as u32).map(create_user_row).collect();
    for row in &rows {
        table.insert(row).unwrap();
    }
    rows
}

#[test]
fn test_open_new_table_is_empty() {
    let temp_db = TempDatabase::with_prefix("table_new");
    let mut table = temp_db.open_table().unwrap();
    assert_eq!(table.row_count(), 0);
    assert!(!table.is_full());
    assert!(table.scan().unwrap().is_empty());
}

#[test]
fn test_insert_and_scan_in_order() {
    let temp_db = TempDatabase::with_prefix("table_scenario");
    let alice = Row::new(1, "alice", "a@x.com").unwrap();
    let bob = Row::new(2, "bob", "b@x.com").unwrap();

    let mut table = temp_db.open_table().unwrap();
    table.insert(&alice).unwrap();
    table.insert(&bob).unwrap();
    assert_eq!(table.scan().unwrap(), vec![alice.clone(), bob.clone()]);

    table.save().unwrap();
    table.close().unwrap();

    let mut reopened = temp_db.open_table().unwrap();
    assert_eq!(reopened.row_count(), 2);
    assert_eq!(reopened.scan().unwrap(), vec![alice, bob]);
}

#[test]
fn test_scan_is_restartable() {
    let temp_db = TempDatabase::with_prefix("table_restart");
    let mut table = temp_db.open_table().unwrap();
    let rows = fill_table(&mut table, 20);

    assert_eq!(table.scan().unwrap(), rows);
    assert_eq!(table.scan().unwrap(), rows);
}

#[test]
fn test_capacity_limit() {
    let temp_db = TempDatabase::with_prefix("table_capacity");
    let mut table = temp_db.open_table().unwrap();
    fill_table(&mut table, TABLE_MAX_ROWS);
    assert_eq!(table.row_count(), TABLE_MAX_ROWS);
    assert!(table.is_full());

    let overflow = create_user_row(TABLE_MAX_ROWS as u32);
    match table.insert(&overflow) {
        Err(DatabaseError::TableFull { max_rows }) => assert_eq!(max_rows, TABLE_MAX_ROWS),
        other => panic!("Expected TableFull, got {:?}", other),
    }
    assert_eq!(table.row_count(), TABLE_MAX_ROWS);
}

#[test]
fn test_persistence_round_trip_at_page_boundaries() {
    for count in [0, 1, 5, 13, 14, 15, 195, 196, 197, TABLE_MAX_ROWS] {
        let temp_db = TempDatabase::with_prefix("table_persist");
        let rows = {
            let mut table = temp_db.open_table().unwrap();
            let rows = fill_table(&mut table, count);
            table.close().unwrap();
            rows
        };

        assert_eq!(
            fs::metadata(&temp_db.path).unwrap().len(),
            stored_length(count),
            "file length for {} rows",
            count
        );

        let mut reopened = temp_db.open_table().unwrap();
        assert_eq!(reopened.row_count(), count, "row count for {} rows", count);
        assert_eq!(reopened.scan().unwrap(), rows);
    }
}

#[test]
fn test_partial_last_page() {
    let temp_db = TempDatabase::with_prefix("table_partial");
    {
        let mut table = temp_db.open_table().unwrap();
        fill_table(&mut table, 5);
        table.save().unwrap();
        table.close().unwrap();
    }

    assert_eq!(
        fs::metadata(&temp_db.path).unwrap().len(),
        (5 * ROW_SIZE) as u64
    );
    let table = temp_db.open_table().unwrap();
    assert_eq!(table.row_count(), 5);
}

#[test]
fn test_full_pages_are_saved_with_padding() {
    let temp_db = TempDatabase::with_prefix("table_padding");
    {
        let mut table = temp_db.open_table().unwrap();
        fill_table(&mut table, ROWS_PER_PAGE + 1);
        table.close().unwrap();
    }

    let on_disk = fs::read(&temp_db.path).unwrap();
    assert_eq!(on_disk.len(), PAGE_SIZE + ROW_SIZE);
    assert!(
        on_disk[ROWS_PER_PAGE * ROW_SIZE..PAGE_SIZE]
            .iter()
            .all(|&b| b == 0)
    );
    assert_eq!(
        Row::from_bytes(&on_disk[PAGE_SIZE..]).unwrap(),
        create_user_row(ROWS_PER_PAGE as u32)
    );
}

#[test]
fn test_unsaved_rows_are_lost_without_close() {
    let temp_db = TempDatabase::with_prefix("table_unsaved");
    {
        let mut table = temp_db.open_table().unwrap();
        fill_table(&mut table, 3);
        drop(table);
    }

    let table = temp_db.open_table().unwrap();
    assert_eq!(table.row_count(), 0);
}

#[test]
fn test_append_after_reopen() {
    let temp_db = TempDatabase::with_prefix("table_append");
    let mut expected = {
        let mut table = temp_db.open_table().unwrap();
        let rows = fill_table(&mut table, 20);
        table.close().unwrap();
        rows
    };

    {
        let mut table = temp_db.open_table().unwrap();
        for id in 20..30 {
            let row = create_user_row(id);
            table.insert(&row).unwrap();
            expected.push(row);
        }
        table.close().unwrap();
    }

    let mut table = temp_db.open_table().unwrap();
    assert_eq!(table.row_count(), 30);
    assert_eq!(table.scan().unwrap(), expected);
}

#[test]
fn test_torn_trailing_row_is_dropped_and_trimmed() {
    let temp_db = TempDatabase::with_prefix("table_torn");
    let rows = {
        let mut table = temp_db.open_table().unwrap();
        let rows = fill_table(&mut table, 5);
        table.close().unwrap();
        rows
    };

    // Simulate a crash halfway through writing a sixth row
    let mut on_disk = fs::read(&temp_db.path).unwrap();
    on_disk.extend_from_slice(&[0xEE; 100]);
    fs::write(&temp_db.path, &on_disk).unwrap();

    let mut table = temp_db.open_table().unwrap();
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.scan().unwrap(), rows);
    table.close().unwrap();

    assert_eq!(
        fs::metadata(&temp_db.path).unwrap().len(),
        (5 * ROW_SIZE) as u64
    );
}

#[test]
fn test_torn_bytes_in_padding_are_not_saved() {
    let temp_db = TempDatabase::with_prefix("table_torn_padding");
    let row_count = 2 * ROWS_PER_PAGE;
    let rows = {
        let mut table = temp_db.open_table().unwrap();
        let rows = fill_table(&mut table, row_count);
        table.close().unwrap();
        rows
    };

    // Last page ends with a few stray bytes after its final row
    let rows_end = PAGE_SIZE + ROWS_PER_PAGE * ROW_SIZE;
    let mut on_disk = fs::read(&temp_db.path).unwrap();
    on_disk.truncate(rows_end);
    on_disk.extend_from_slice(&[0xEE; 6]);
    fs::write(&temp_db.path, &on_disk).unwrap();

    let mut table = temp_db.open_table().unwrap();
    assert_eq!(table.row_count(), row_count);
    assert_eq!(table.scan().unwrap(), rows);
    table.close().unwrap();

    let on_disk = fs::read(&temp_db.path).unwrap();
    assert_eq!(on_disk.len() as u64, stored_length(row_count));
    assert!(on_disk[rows_end..].iter().all(|&b| b == 0));
}

#[test]
fn test_oversized_row_leaves_table_unchanged() {
    let temp_db = TempDatabase::with_prefix("table_oversized");
    let mut table = temp_db.open_table().unwrap();
    fill_table(&mut table, 2);

    let mut bad = create_user_row(99);
    bad.email = "e".repeat(300);
    assert!(matches!(
        table.insert(&bad),
        Err(DatabaseError::FieldTooLong { field: "email", .. })
    ));
    assert_eq!(table.row_count(), 2);
}

#[test]
fn test_page_cache_stays_bounded() {
    let temp_db = TempDatabase::with_prefix("table_cache");
    let mut table = temp_db.open_table().unwrap();
    fill_table(&mut table, TABLE_MAX_ROWS);
    table.scan().unwrap();
    assert_eq!(table.pager().cached_pages(), TABLE_MAX_ROWS / ROWS_PER_PAGE);
}
