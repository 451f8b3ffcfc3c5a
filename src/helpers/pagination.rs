//! Pagination over ordered record sets

/// One page of a paginated listing.
///
/// Items are borrowed from the underlying record set for the duration of
/// rendering; nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// 1-based page number
    pub index: usize,
    pub items: &'a [T],
}

/// Split `items` into pages of at most `page_size` entries.
///
/// Produces `ceil(n / page_size)` pages; page `i` (1-based) holds
/// `items[(i-1)*page_size .. i*page_size)`. An empty input yields an empty
/// page list, not a single empty page.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<Page<'_, T>> {
    assert!(page_size > 0, "page_size must be positive");

    items
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            index: i + 1,
            items: chunk,
        })
        .collect()
}

/// Page-index sequence `[1..=page_count]` for pagination controls
pub fn page_range(page_count: usize) -> Vec<usize> {
    (1..=page_count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_counts_and_order() {
        let items: Vec<u32> = (1..=10).collect();
        let pages = paginate(&items, 4);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].index, 1);
        assert_eq!(pages[0].items, &[1, 2, 3, 4]);
        assert_eq!(pages[1].items, &[5, 6, 7, 8]);
        assert_eq!(pages[2].items, &[9, 10]);

        // Concatenating all pages reproduces the input exactly
        let rejoined: Vec<u32> = pages.iter().flat_map(|p| p.items.iter().copied()).collect();
        assert_eq!(rejoined, items);
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let items: Vec<u32> = (1..=8).collect();
        let pages = paginate(&items, 4);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].items.len(), 4);
    }

    #[test]
    fn test_paginate_empty_yields_no_pages() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, 4).is_empty());
    }

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(3), vec![1, 2, 3]);
        assert!(page_range(0).is_empty());
    }
}
