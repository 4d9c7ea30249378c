use crate::{
    executor::cursor::Cursor,
    storage::table::Table,
    types::{RowIndex, error::DatabaseError, row::Row},
};

pub trait Scanner {
    fn scan(&mut self) -> Result<Option<Row>, DatabaseError>;
    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<Row>, DatabaseError>;
    fn reset(&mut self) -> Result<(), DatabaseError>;
}

pub struct ScanIterator<S: Scanner> {
    scanner: S,
}

impl<S: Scanner> ScanIterator<S> {
    pub fn new(scanner: S) -> Self {
        Self { scanner }
    }
}

impl<S: Scanner> Iterator for ScanIterator<S> {
    type Item = Result<Row, DatabaseError>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.scanner.scan() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Sequential scanner over a [`Table`], driven by a [`Cursor`].
///
/// The row count is captured when the scanner is created (and again on
/// [`Scanner::reset`]); rows appended later are not yielded by this pass.
/// The scanner holds the table mutably, so no insert can happen while it is
/// alive.
pub struct TableScanner<'a> {
    cursor: Option<Cursor<'a>>,
    end: RowIndex,
}

impl<'a> TableScanner<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        let end = table.row_count();
        Self {
            cursor: Some(Cursor::table_start(table)),
            end,
        }
    }

    pub fn row_count(&self) -> RowIndex {
        self.end
    }
}

impl Scanner for TableScanner<'_> {
    fn scan(&mut self) -> Result<Option<Row>, DatabaseError> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(None);
        };
        if cursor.is_end() || cursor.row_index() >= self.end {
            return Ok(None);
        }
        // A row that fails to decode is still consumed
        let row = cursor.row();
        cursor.advance();
        row.map(Some)
    }

    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<Row>, DatabaseError> {
        let mut rows = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            match self.scan()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }

    fn reset(&mut self) -> Result<(), DatabaseError> {
        if let Some(cursor) = self.cursor.take() {
            let table = cursor.into_table();
            self.end = table.row_count();
            self.cursor = Some(Cursor::table_start(table));
        }
        Ok(())
    }
}
