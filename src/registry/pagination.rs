//! # Pagination Helper
//!
//! Slices an ordered collection into fixed-size pages. Out-of-range page
//! numbers (too high, zero, or negative) yield an empty page rather than an
//! error; the total page count is reported either way. This permissive
//! policy is part of the listing contract and must hold for any input.

/// Animals shown per listing page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of an ordered collection, plus the totals the listing view needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page, in collection order
    pub items: &'a [T],
    /// The 1-based page number that was requested
    pub current_page: i64,
    /// `ceil(total / page_size)`, 0 for an empty collection
    pub total_pages: usize,
    /// Size of the full collection
    pub total: usize,
}

/// Slice `items` into the 1-based page `page_number` of size `page_size`.
pub fn paginate<T>(items: &[T], page_number: i64, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);

    let page_items = if page_number < 1 {
        &items[0..0]
    } else {
        let start = (page_number as usize - 1).saturating_mul(page_size);
        if start >= total {
            &items[0..0]
        } else {
            let end = (start + page_size).min(total);
            &items[start..end]
        }
    };

    Page {
        items: page_items,
        current_page: page_number,
        total_pages,
        total,
    }
}
