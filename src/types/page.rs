use crate::types::{PAGE_SIZE, PageNumber, ROW_SIZE, ROWS_PER_PAGE, error::DatabaseError};

/*
 * Page Layout on Disk (no header, rows packed from offset 0)
 * ┌─────────────────────────────────────────────────────────────────┐
 * │ [row 0 (291)] [row 1 (291)] ... [row 13 (291)]                  │
 * ├─────────────────────────────────────────────────────────────────┤
 * │ PADDING (4096 - 14 * 291 = 22 bytes, always zero)               │
 * └─────────────────────────────────────────────────────────────────┘
 */

pub const PAGE_PADDING: usize = PAGE_SIZE - ROWS_PER_PAGE * ROW_SIZE;

pub struct Page {
    pub page_number: PageNumber,
    data: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    pub fn new(page_number: PageNumber) -> Self {
        Self {
            page_number,
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }

    /// Zeroes the bytes after the last row slot.
    pub fn clear_padding(&mut self) {
        self.data[ROWS_PER_PAGE * ROW_SIZE..].fill(0);
    }

    /// The row slot starting at `offset`.
    pub fn row_slot(&self, offset: usize) -> Result<&[u8], DatabaseError> {
        self.check_slot(offset)?;
        Ok(&self.data[offset..offset + ROW_SIZE])
    }

    pub fn row_slot_mut(&mut self, offset: usize) -> Result<&mut [u8], DatabaseError> {
        self.check_slot(offset)?;
        Ok(&mut self.data[offset..offset + ROW_SIZE])
    }

    fn check_slot(&self, offset: usize) -> Result<(), DatabaseError> {
        if offset % ROW_SIZE != 0 || offset + ROW_SIZE > ROWS_PER_PAGE * ROW_SIZE {
            return Err(DatabaseError::InvalidSlotOffset {
                page_number: self.page_number,
                offset,
            });
        }
        Ok(())
    }
}
