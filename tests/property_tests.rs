//! Property-based tests for pagination invariants.
//!
//! Tests validate:
//! 1. The exhaustion predicate matches `total > page * page_size`
//! 2. Paging to the end renders every record once, in order
//! 3. Blank queries never start a session
//! 4. Visibility ratios stay within [0, 1]

use pixgal::gallery::{Gallery, Lightbox};
use pixgal::model::{FetchResult, ImageRecord, SearchQuery};
use pixgal::notify::{Notifier, Severity};
use pixgal::pagination::{
    LoadMoreTrigger, LoadState, PaginationController, RowSpan, intersection_ratio,
    more_pages_remain,
};
use proptest::prelude::*;

struct Silent;

impl Notifier for Silent {
    fn notify(&self, _severity: Severity, _message: &str) {}
}

fn record(id: u64) -> ImageRecord {
    ImageRecord {
        id: Some(id),
        preview_url: format!("https://cdn.example/{id}.jpg"),
        fullsize_url: format!("https://cdn.example/{id}_big.jpg"),
        tags: id.to_string(),
        likes: 0,
        views: 0,
        comments: 0,
        downloads: 0,
    }
}

fn page(total: u64, page: u32, per_page: u32) -> FetchResult {
    let start = u64::from(page - 1) * u64::from(per_page);
    let end = (start + u64::from(per_page)).min(total);
    FetchResult {
        records: (start..end).map(record).collect(),
        total_available: total,
    }
}

// ===== Property 1: Exhaustion predicate =====

proptest! {
    #[test]
    fn more_pages_matches_definition(total in 0u64..10_000, page in 0u32..300, size in 1u32..200) {
        let expected = total > u64::from(page) * u64::from(size);
        prop_assert_eq!(more_pages_remain(total, page, size), expected);
    }

    #[test]
    fn exhaustion_is_permanent(total in 0u64..10_000, page in 0u32..300, size in 1u32..200) {
        if !more_pages_remain(total, page, size) {
            prop_assert!(!more_pages_remain(total, page + 1, size));
        }
    }
}

// ===== Property 2: Paging to the end =====

proptest! {
    #[test]
    fn paging_renders_every_record_in_order(total in 1u64..400, size in 1u32..60) {
        let mut controller = PaginationController::new(
            Gallery::new(Lightbox::default()),
            Silent,
            size,
            LoadMoreTrigger::Manual,
        );

        let mut fetch = controller.start_search("anything");
        while let Some(pending) = fetch {
            let result = page(total, pending.page(), pending.per_page());
            controller.complete(&pending, Ok(result));
            fetch = controller.load_more();
        }

        let expected_pages = total.div_ceil(u64::from(size));
        prop_assert_eq!(controller.state(), LoadState::Exhausted);
        prop_assert_eq!(u64::from(controller.current_page()), expected_pages);
        prop_assert!(!controller.trigger_visible());

        let alts: Vec<String> = controller.gallery().entries().iter().map(|e| e.alt.clone()).collect();
        let expected: Vec<String> = (0..total).map(|id| id.to_string()).collect();
        prop_assert_eq!(alts, expected);
    }
}

// ===== Property 3: Blank queries =====

proptest! {
    #[test]
    fn whitespace_query_is_rejected(s in "[ \t\n]*") {
        prop_assert!(SearchQuery::new(&s).is_none());
    }

    #[test]
    fn query_is_trimmed(s in "[ \t]*[a-z]{1,10}[ \t]*") {
        let query = SearchQuery::new(&s).unwrap();
        prop_assert_eq!(query.as_str(), s.trim());
    }
}

// ===== Property 4: Visibility ratio =====

proptest! {
    #[test]
    fn ratio_is_a_fraction(
        start in 0usize..500,
        len in 0usize..20,
        view_start in 0usize..500,
        view_len in 0usize..100,
        margin in 0usize..10,
    ) {
        let ratio = intersection_ratio(RowSpan::new(start, len), RowSpan::new(view_start, view_len), margin);
        prop_assert!((0.0..=1.0).contains(&ratio));
    }
}
