//! Page computation over latest-view projections.
//!
//! The contract, shared by every paginated listing:
//! - `total` counts all matching rows, independent of slicing;
//! - valid pages run `1..=ceil(total / per_page)` (page 1 when empty);
//! - out-of-range requests clamp to the nearest valid page instead of
//!   erroring, so a page is only ever empty when `total == 0`;
//! - repeated calls with no intervening writes return identical
//!   `(items, total)`.

use serde::{Deserialize, Serialize};

/// One page of a listing, with the exact total across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    /// The page actually served, after clamping.
    pub page: usize,
    pub per_page: usize,
}

/// Number of the last valid page (1 when there are no rows).
pub fn last_page(total: usize, per_page: usize) -> usize {
    if total == 0 || per_page == 0 {
        1
    } else {
        total.div_ceil(per_page)
    }
}

/// Clamps a requested page into the valid range for `total` rows.
pub fn clamp_page(requested: usize, total: usize, per_page: usize) -> usize {
    requested.clamp(1, last_page(total, per_page))
}

/// Slices a fully sorted row set into the requested page.
///
/// Sorting must happen before calling this; the slice is taken with
/// `skip = (page - 1) * per_page`.
pub fn paginate<T>(rows: Vec<T>, requested_page: usize, per_page: usize) -> Page<T> {
    let total = rows.len();
    let page = clamp_page(requested_page, total, per_page);
    let items: Vec<T> = rows
        .into_iter()
        .skip((page - 1) * per_page.max(1))
        .take(per_page)
        .collect();
    Page {
        items,
        total,
        page,
        per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_rounds_up() {
        assert_eq!(last_page(13, 10), 2);
        assert_eq!(last_page(20, 10), 2);
        assert_eq!(last_page(21, 10), 3);
        assert_eq!(last_page(1, 10), 1);
    }

    #[test]
    fn test_last_page_empty_is_one() {
        assert_eq!(last_page(0, 10), 1);
    }

    #[test]
    fn test_clamp_low_and_high() {
        assert_eq!(clamp_page(0, 13, 10), 1);
        assert_eq!(clamp_page(1, 13, 10), 1);
        assert_eq!(clamp_page(2, 13, 10), 2);
        assert_eq!(clamp_page(9, 13, 10), 2);
    }

    #[test]
    fn test_paginate_thirteen_rows_two_pages() {
        let rows: Vec<u32> = (1..=13).collect();

        let first = paginate(rows.clone(), 1, 10);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 13);
        assert_eq!(first.page, 1);

        let second = paginate(rows.clone(), 2, 10);
        assert_eq!(second.items, vec![11, 12, 13]);
        assert_eq!(second.total, 13);

        // Page 9 clamps to the last valid page.
        let clamped = paginate(rows, 9, 10);
        assert_eq!(clamped.items, vec![11, 12, 13]);
        assert_eq!(clamped.page, 2);
    }

    #[test]
    fn test_paginate_empty_rows() {
        let page = paginate(Vec::<u32>::new(), 5, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let rows: Vec<u32> = (1..=25).collect();
        let a = paginate(rows.clone(), 2, 10);
        let b = paginate(rows, 2, 10);
        assert_eq!(a.items, b.items);
        assert_eq!(a.total, b.total);
    }

    #[test]
    fn test_exact_multiple_has_no_phantom_page() {
        let rows: Vec<u32> = (1..=20).collect();
        let page = paginate(rows, 3, 10);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, (11..=20).collect::<Vec<u32>>());
    }
}
