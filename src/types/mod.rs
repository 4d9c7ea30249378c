pub mod error;
pub mod page;
pub mod row;

// Common type aliases
pub type PageNumber = usize;
pub type RowIndex = usize;

// Row layout: id | username | email
pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = 32;
pub const EMAIL_SIZE: usize = 255;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE; // 291

// Table layout
pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100; // 400 KiB ceiling for the page cache
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE; // 14
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES; // 1400

/// Maps a logical row index to the page holding it and the byte offset of
/// its slot inside that page.
pub const fn row_position(row_index: RowIndex) -> (PageNumber, usize) {
    let page_number = row_index / ROWS_PER_PAGE;
    let offset = (row_index % ROWS_PER_PAGE) * ROW_SIZE;
    (page_number, offset)
}
