use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::types::{
    PAGE_SIZE, PageNumber, TABLE_MAX_PAGES,
    error::{DatabaseError, Result},
    page::Page,
};

/// Write-back page cache over the backing file.
///
/// Pages are read at most once and stay resident until the pager is closed.
/// There is no eviction: the table never addresses more than
/// [`TABLE_MAX_PAGES`] pages, so the cache is bounded at 400 KiB.
///
/// Nothing reaches the file until [`Pager::flush`] is called for a page; the
/// caller decides how many bytes of it are meaningful.
pub struct Pager {
    path: PathBuf,
    file: File,
    file_length: u64,
    pages: Vec<Option<Page>>,
}

impl Pager {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)?;
        let file_length = file.metadata()?.len();

        tracing::debug!(path = %path.display(), file_length, "Opened pager");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            file_length,
            pages: (0..TABLE_MAX_PAGES).map(|_| None).collect(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Number of pages currently materialized in memory.
    pub fn cached_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    pub fn get_page(&mut self, page_number: PageNumber) -> Result<&mut Page> {
        if page_number >= TABLE_MAX_PAGES {
            return Err(DatabaseError::PageOutOfRange {
                page_number,
                max: TABLE_MAX_PAGES,
            });
        }

        let page = match self.pages[page_number].take() {
            Some(page) => page,
            None => self.load_page(page_number)?,
        };
        Ok(self.pages[page_number].insert(page))
    }

    /// Reads whatever part of `page_number` exists on disk into a zeroed page.
    fn load_page(&mut self, page_number: PageNumber) -> Result<Page> {
        let mut page = Page::new(page_number);
        let page_start = (page_number * PAGE_SIZE) as u64;
        let stored = self.file_length.saturating_sub(page_start).min(PAGE_SIZE as u64) as usize;

        if stored > 0 {
            self.file.seek(SeekFrom::Start(page_start))?;
            self.file.read_exact(&mut page.as_bytes_mut()[..stored])?;
        }

        tracing::trace!(page_number, stored, "Materialized page");
        Ok(page)
    }

    /// Writes the first `byte_count` bytes of a cached page to its slot in
    /// the file. A page that was never materialized cannot differ from the
    /// file and is skipped.
    pub fn flush(&mut self, page_number: PageNumber, byte_count: usize) -> Result<()> {
        if page_number >= TABLE_MAX_PAGES {
            return Err(DatabaseError::PageOutOfRange {
                page_number,
                max: TABLE_MAX_PAGES,
            });
        }
        if byte_count > PAGE_SIZE {
            return Err(DatabaseError::InvalidFlushSize {
                page_number,
                byte_count,
            });
        }

        let Some(page) = self.pages[page_number].as_ref() else {
            tracing::trace!(page_number, "Skipping flush of unloaded page");
            return Ok(());
        };

        let page_start = (page_number * PAGE_SIZE) as u64;
        self.file.seek(SeekFrom::Start(page_start))?;
        self.file.write_all(&page.as_bytes()[..byte_count])?;
        self.file.flush()?;

        self.file_length = self.file_length.max(page_start + byte_count as u64);
        Ok(())
    }

    /// Shortens the backing file to `length` bytes. Cached pages are left
    /// untouched.
    pub fn truncate(&mut self, length: u64) -> Result<()> {
        if length < self.file_length {
            self.file.set_len(length)?;
            self.file_length = length;
        }
        Ok(())
    }

    /// Releases the file handle. Cached pages are dropped without flushing.
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        tracing::debug!(path = %self.path.display(), "Closed pager");
        Ok(())
    }
}
