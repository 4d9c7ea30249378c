use crate::{
    storage::table::Table,
    types::{TABLE_MAX_ROWS, error::DatabaseError, row::Row, row_position},
};

/// Trait for appending rows to a table
pub trait Inserter {
    /// Insert a single row
    fn insert(&mut self, row: &Row) -> Result<(), DatabaseError>;

    /// Insert several rows; either all of them are appended or none
    fn insert_batch(&mut self, rows: &[Row]) -> Result<(), DatabaseError>;
}

pub struct TableInserter<'a> {
    table: &'a mut Table,
}

impl<'a> TableInserter<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        Self { table }
    }

    pub fn remaining_capacity(&self) -> usize {
        TABLE_MAX_ROWS - self.table.row_count()
    }
}

impl Inserter for TableInserter<'_> {
    fn insert(&mut self, row: &Row) -> Result<(), DatabaseError> {
        self.table.insert(row)
    }

    fn insert_batch(&mut self, rows: &[Row]) -> Result<(), DatabaseError> {
        if rows.len() > self.remaining_capacity() {
            return Err(DatabaseError::TableFull {
                max_rows: TABLE_MAX_ROWS,
            });
        }

        // Validate all rows before touching any page
        for row in rows {
            row.validate()?;
        }

        // Materialize every target page up front so no write can fail midway
        if let Some(last) = rows.len().checked_sub(1) {
            let start = self.table.row_count();
            let (first_page, _) = row_position(start);
            let (last_page, _) = row_position(start + last);
            for page_number in first_page..=last_page {
                self.table.pager_mut().get_page(page_number)?;
            }
        }

        for row in rows {
            self.table.insert(row)?;
        }
        Ok(())
    }
}
