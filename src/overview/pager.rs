use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fixed-size, 1-based pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of selectable pages; never zero, so a selector always has page 1.
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        let n = total.div_ceil(self.page_size);
        if n == 0 { 1 } else { n }
    }

    /// Rows of page `page` (1-based). Page 0 or a page past the end is empty.
    #[must_use]
    pub fn page<'a, T>(&self, rows: &'a [T], page: usize) -> &'a [T] {
        let Some(start) = page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(self.page_size))
        else {
            return &[];
        };
        if start >= rows.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(rows.len());
        &rows[start..end]
    }
}

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// 1-based page number that was requested.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub rows: Vec<T>,
}

impl<T: Clone> Page<T> {
    #[must_use]
    pub fn from_rows(pager: Pager, rows: &[T], page: usize) -> Self {
        Self {
            page,
            page_count: pager.page_count(rows.len()),
            total_rows: rows.len(),
            rows: pager.page(rows, page).to_vec(),
        }
    }
}
