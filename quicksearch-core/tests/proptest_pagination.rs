use std::num::NonZeroUsize;

use proptest::prelude::*;
use quicksearch_core::{PageLink, Paginator, ResultItem, ResultStore, Status};

fn items(n: usize) -> Vec<ResultItem> {
    (0..n)
        .map(|i| ResultItem::new(i.to_string(), format!("Item {i}")))
        .collect()
}

proptest! {
    /// Property: total pages is max(1, ceil(len / size))
    #[test]
    fn prop_total_pages_formula(len in 0usize..500, size in 1usize..50) {
        let pager = Paginator::new(NonZeroUsize::new(size).unwrap());
        let expected = std::cmp::max(1, (len + size - 1) / size);
        prop_assert_eq!(pager.total_pages(len), expected);
    }

    /// Property: out-of-range navigation leaves the page unchanged
    #[test]
    fn prop_go_to_out_of_range_is_noop(
        len in 0usize..200,
        size in 1usize..20,
        start in 1usize..20,
        target in 0usize..400,
    ) {
        let mut pager = Paginator::new(NonZeroUsize::new(size).unwrap());
        let total = pager.total_pages(len);
        let start = start.min(total);
        prop_assert!(pager.go_to(start, len));

        let moved = pager.go_to(target, len);
        if target >= 1 && target <= total {
            prop_assert!(moved);
            prop_assert_eq!(pager.current(), target);
        } else {
            prop_assert!(!moved);
            prop_assert_eq!(pager.current(), start);
        }
    }

    /// Property: pages partition the result set in order
    #[test]
    fn prop_pages_cover_items_in_order(len in 0usize..120, size in 1usize..15) {
        let all = items(len);
        let mut store = ResultStore::new(NonZeroUsize::new(size).unwrap());
        store.replace(all.clone());

        let mut seen = Vec::new();
        for page in 1..=store.total_pages() {
            prop_assert!(store.go_to(page));
            let slice = store.visible_slice();
            prop_assert!(slice.len() <= size);
            if len > 0 {
                prop_assert!(!slice.is_empty());
            }
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(seen, all);
    }

    /// Property: any replace puts the store back on page 1
    #[test]
    fn prop_replace_resets_page(first in 1usize..100, second in 0usize..100, page in 1usize..30) {
        let mut store = ResultStore::new(NonZeroUsize::new(5).unwrap());
        store.replace(items(first));
        store.go_to(page);

        store.replace(items(second));
        prop_assert_eq!(store.page(), 1);
        let expected = if second == 0 { Status::Empty } else { Status::Populated };
        prop_assert_eq!(store.status(), &expected);
    }

    /// Property: page strip always starts at 1, ends at the last page,
    /// includes the current page, and holds at most the window plus four slots
    #[test]
    fn prop_page_links_shape(len in 1usize..1000, page in 1usize..200, max_visible in 5usize..15) {
        let mut pager = Paginator::new(NonZeroUsize::new(5).unwrap());
        let total = pager.total_pages(len);
        pager.go_to(page.min(total), len);

        let links = pager.page_links(len, max_visible);
        prop_assert_eq!(links.first(), Some(&PageLink::Page(1)));
        prop_assert_eq!(links.last(), Some(&PageLink::Page(total)));
        prop_assert!(links.contains(&PageLink::Page(pager.current())));
        prop_assert!(links.len() <= 2 * (max_visible / 2) + 1 + 4);

        let pages: Vec<usize> = links
            .iter()
            .filter_map(|l| match l { PageLink::Page(p) => Some(*p), PageLink::Ellipsis => None })
            .collect();
        prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
    }
}
