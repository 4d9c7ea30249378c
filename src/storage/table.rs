use std::path::Path;

use crate::{
    executor::{
        cursor::Cursor,
        scan::{ScanIterator, TableScanner},
    },
    storage::pager::Pager,
    types::{
        PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS,
        error::{DatabaseError, Result},
        row::Row,
    },
};

/// The single fixed-schema table: a row count over a [`Pager`].
///
/// Rows are append-only and live at deterministic positions (see
/// [`crate::types::row_position`]). Nothing is persisted until [`Table::save`]
/// or [`Table::close`] is called.
pub struct Table {
    pager: Pager,
    row_count: usize,
}

impl Table {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut pager = Pager::open(path)?;
        let row_count = recover_row_count(pager.file_length());
        clear_torn_padding(&mut pager)?;

        tracing::info!(
            path = %pager.path().display(),
            file_length = pager.file_length(),
            row_count,
            "Opened table"
        );

        Ok(Self { pager, row_count })
    }

    pub fn path(&self) -> &Path {
        self.pager.path()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_full(&self) -> bool {
        self.row_count >= TABLE_MAX_ROWS
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub(crate) fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    /// Appends `row` after the last stored row.
    ///
    /// A full table is reported as [`DatabaseError::TableFull`] and left
    /// unchanged.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            return Err(DatabaseError::TableFull {
                max_rows: TABLE_MAX_ROWS,
            });
        }

        let bytes = row.to_bytes()?;
        let mut cursor = Cursor::table_end(self);
        cursor.value()?.copy_from_slice(&bytes);
        self.row_count += 1;
        Ok(())
    }

    /// All rows in insertion order.
    pub fn scan(&mut self) -> Result<Vec<Row>> {
        ScanIterator::new(TableScanner::new(self)).collect()
    }

    pub fn scanner(&mut self) -> TableScanner<'_> {
        TableScanner::new(self)
    }

    /// Writes every occupied page back to the file: full pages whole, the
    /// trailing page only up to its last row.
    pub fn save(&mut self) -> Result<()> {
        let full_pages = self.row_count / ROWS_PER_PAGE;
        for page_number in 0..full_pages {
            self.pager.flush(page_number, PAGE_SIZE)?;
        }

        let remainder = self.row_count % ROWS_PER_PAGE;
        if remainder > 0 {
            self.pager.flush(full_pages, remainder * ROW_SIZE)?;
        }

        // Drops torn bytes left behind by a damaged file
        self.pager.truncate(stored_length(self.row_count))?;

        tracing::debug!(
            row_count = self.row_count,
            file_length = self.pager.file_length(),
            "Saved table"
        );
        Ok(())
    }

    /// Saves and releases the file. The pager is closed even if the save
    /// fails; the save error takes precedence.
    pub fn close(mut self) -> Result<()> {
        let saved = self.save();
        if let Err(e) = &saved {
            tracing::error!(error = %e, "Failed to save table on close");
        }
        let closed = self.pager.close();
        saved.and(closed)
    }
}

/// Zeroes the padding of the last page when a torn write reached past its
/// final row slot, so a full-page flush cannot write those bytes back.
fn clear_torn_padding(pager: &mut Pager) -> Result<()> {
    let page_number = (pager.file_length() / PAGE_SIZE as u64) as usize;
    let tail = (pager.file_length() % PAGE_SIZE as u64) as usize;
    if tail > ROWS_PER_PAGE * ROW_SIZE && page_number < TABLE_MAX_PAGES {
        pager.get_page(page_number)?.clear_padding();
    }
    Ok(())
}

/// File length produced by saving `row_count` rows.
pub fn stored_length(row_count: usize) -> u64 {
    let full_pages = row_count / ROWS_PER_PAGE;
    let remainder = row_count % ROWS_PER_PAGE;
    (full_pages * PAGE_SIZE + remainder * ROW_SIZE) as u64
}

/// Derives the row count from the length of a file written by [`Table::save`].
///
/// Every full page carries `PAGE_SIZE - ROWS_PER_PAGE * ROW_SIZE` bytes of
/// padding, so the count is computed per page rather than as
/// `file_length / ROW_SIZE`. Torn trailing rows and rows beyond
/// [`TABLE_MAX_ROWS`] are dropped with a warning.
pub fn recover_row_count(file_length: u64) -> usize {
    let full_pages = (file_length / PAGE_SIZE as u64) as usize;
    let tail = (file_length % PAGE_SIZE as u64) as usize;

    if tail % ROW_SIZE != 0 {
        tracing::warn!(
            file_length,
            torn_bytes = tail % ROW_SIZE,
            "File ends with a partial row, ignoring it"
        );
    }

    let row_count = full_pages
        .saturating_mul(ROWS_PER_PAGE)
        .saturating_add(tail / ROW_SIZE);
    if row_count > TABLE_MAX_ROWS {
        tracing::warn!(
            file_length,
            row_count,
            max_rows = TABLE_MAX_ROWS,
            "File holds more rows than the table allows, ignoring the excess"
        );
        return TABLE_MAX_ROWS;
    }
    row_count
}
