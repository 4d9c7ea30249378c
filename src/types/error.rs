use thiserror::Error;

use crate::types::PageNumber;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table full (max rows: {max_rows})")]
    TableFull { max_rows: usize },

    #[error("Page {page_number} out of range (max: {max})")]
    PageOutOfRange { page_number: PageNumber, max: usize },

    #[error("Field '{field}' is too long: {actual} bytes (max: {max})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' contains non-ASCII bytes")]
    NonAsciiField { field: &'static str },

    #[error("Field '{field}' contains a NUL byte")]
    NulByteInField { field: &'static str },

    #[error("Malformed row: expected {expected} bytes, got {actual} bytes")]
    MalformedRow { expected: usize, actual: usize },

    #[error("Invalid row slot offset {offset} in page {page_number}")]
    InvalidSlotOffset {
        page_number: PageNumber,
        offset: usize,
    },

    #[error("Invalid flush size {byte_count} for page {page_number}")]
    InvalidFlushSize {
        page_number: PageNumber,
        byte_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
