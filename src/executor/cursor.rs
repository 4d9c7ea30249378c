use crate::{
    storage::table::Table,
    types::{PageNumber, RowIndex, error::Result, row::Row, row_position},
};

/// Forward-only position over a table's rows.
///
/// A cursor is built at the start or the end of the table and only ever
/// moves forward. "At end" is derived from the table's current row count on
/// every check rather than stored.
pub struct Cursor<'a> {
    table: &'a mut Table,
    row_index: RowIndex,
}

impl<'a> Cursor<'a> {
    pub fn table_start(table: &'a mut Table) -> Self {
        Self {
            table,
            row_index: 0,
        }
    }

    pub fn table_end(table: &'a mut Table) -> Self {
        let row_index = table.row_count();
        Self { table, row_index }
    }

    pub fn row_index(&self) -> RowIndex {
        self.row_index
    }

    pub fn is_end(&self) -> bool {
        self.row_index >= self.table.row_count()
    }

    pub fn advance(&mut self) {
        self.row_index += 1;
    }

    /// Page number and in-page byte offset of the row under the cursor.
    pub fn position(&self) -> (PageNumber, usize) {
        row_position(self.row_index)
    }

    /// The raw row slot under the cursor, loading its page if needed.
    pub fn value(&mut self) -> Result<&mut [u8]> {
        let (page_number, offset) = self.position();
        self.table
            .pager_mut()
            .get_page(page_number)?
            .row_slot_mut(offset)
    }

    pub fn row(&mut self) -> Result<Row> {
        let (page_number, offset) = self.position();
        let page = self.table.pager_mut().get_page(page_number)?;
        Row::from_bytes(page.row_slot(offset)?)
    }

    pub fn into_table(self) -> &'a mut Table {
        self.table
    }
}
