use serde::Serialize;

pub const DEFAULT_PER_PAGE: usize = 25;

/// A fixed-size window starting at a zero-based row offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub offset: usize,
    pub size: usize,
}

impl Page {
    pub fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PER_PAGE)
    }
}

/// Rows `[offset, min(offset + size, len))`. Never panics, whatever the offset.
pub fn window<T>(rows: &[T], page: Page) -> &[T] {
    let start = page.offset.min(rows.len());
    let end = start.saturating_add(page.size).min(rows.len());
    &rows[start..end]
}

/// Navigation details for a page over `total` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub offset: usize,
    pub size: usize,
    pub total: usize,
    /// One-based.
    pub page_number: usize,
    pub page_count: usize,
    pub previous_offset: Option<usize>,
    pub next_offset: Option<usize>,
}

impl PageInfo {
    pub fn new(page: Page, total: usize) -> Self {
        let (page_number, page_count) = match page.size {
            0 => (0, 0),
            size => (page.offset / size + 1, total.div_ceil(size)),
        };
        let next = page.offset.saturating_add(page.size);
        Self {
            offset: page.offset,
            size: page.size,
            total,
            page_number,
            page_count,
            previous_offset: (page.offset > 0 && page.size > 0)
                .then(|| page.offset.saturating_sub(page.size)),
            next_offset: (page.size > 0 && next < total).then_some(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page() {
        let rows: Vec<usize> = (0..40).collect();
        let page = window(&rows, Page::new(25, 25));
        assert_eq!(page.len(), 15);
        assert_eq!(page.first(), Some(&25));
        assert_eq!(page.last(), Some(&39));
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let rows: Vec<usize> = (0..10).collect();
        assert!(window(&rows, Page::new(10, 25)).is_empty());
        assert!(window(&rows, Page::new(usize::MAX, usize::MAX)).is_empty());
        assert_eq!(window(&rows, Page::new(3, usize::MAX)).len(), 7);
    }

    #[test]
    fn test_window_length_property() {
        let rows: Vec<usize> = (0..53).collect();
        for offset in [0, 1, 25, 50, 52, 53, 80] {
            for size in [1, 10, 25] {
                let expected = if offset < rows.len() { size.min(rows.len() - offset) } else { 0 };
                assert_eq!(window(&rows, Page::new(offset, size)).len(), expected);
            }
        }
    }

    #[test]
    fn test_page_info_navigation() {
        let info = PageInfo::new(Page::new(25, 25), 40);
        assert_eq!(info.page_number, 2);
        assert_eq!(info.page_count, 2);
        assert_eq!(info.previous_offset, Some(0));
        assert_eq!(info.next_offset, None);

        let first = PageInfo::new(Page::default(), 60);
        assert_eq!(first.previous_offset, None);
        assert_eq!(first.next_offset, Some(25));
        assert_eq!(first.page_count, 3);

        assert_eq!(PageInfo::new(Page::default(), 0).page_count, 0);
    }
}
