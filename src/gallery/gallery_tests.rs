//! Tests for the gallery renderer.

use super::*;

/// Overlay that records every refresh it receives.
#[derive(Debug, Clone, Default)]
struct CountingOverlay {
    refreshes: usize,
    last_len: usize,
}

impl ZoomOverlay for CountingOverlay {
    fn refresh(&mut self, entries: &[GalleryEntry]) {
        self.refreshes += 1;
        self.last_len = entries.len();
    }
}

fn record(n: u64) -> ImageRecord {
    ImageRecord {
        id: Some(n),
        preview_url: format!("https://cdn.example/{n}_640.jpg"),
        fullsize_url: format!("https://cdn.example/{n}_1280.jpg"),
        tags: format!("tag{n}"),
        likes: n,
        views: n * 10,
        comments: 0,
        downloads: n * 2,
    }
}

fn records(range: std::ops::Range<u64>) -> Vec<ImageRecord> {
    range.map(record).collect()
}

fn gallery() -> Gallery<CountingOverlay> {
    Gallery::new(CountingOverlay::default())
}

// ===== append / reset =====

#[test]
fn append_preserves_input_order() {
    let mut gallery = gallery();
    gallery.append(&records(0..3));
    gallery.append(&records(3..5));

    let alts: Vec<&str> = gallery.entries().iter().map(|e| e.alt.as_str()).collect();
    assert_eq!(alts, vec!["tag0", "tag1", "tag2", "tag3", "tag4"]);
}

#[test]
fn append_does_not_deduplicate() {
    let mut gallery = gallery();
    gallery.append(&[record(7)]);
    gallery.append(&[record(7)]);

    assert_eq!(gallery.len(), 2, "same record on two pages stays twice");
    assert_eq!(gallery.entries()[0], gallery.entries()[1]);
}

#[test]
fn reset_clears_entries_and_scroll() {
    let mut gallery = gallery();
    gallery.append(&records(0..10));
    gallery.scroll_down(12);

    gallery.reset();

    assert!(gallery.is_empty());
    assert_eq!(gallery.scroll_offset(), 0);
    assert_eq!(gallery.pending_scroll(), None);
}

#[test]
fn every_append_refreshes_overlay() {
    let mut gallery = gallery();
    gallery.append(&records(0..2));
    gallery.append(&records(2..5));

    assert_eq!(gallery.overlay().refreshes, 2);
    assert_eq!(gallery.overlay().last_len, 5);
}

#[test]
fn reset_refreshes_overlay_with_empty_index() {
    let mut gallery = gallery();
    gallery.append(&records(0..2));
    gallery.reset();
    assert_eq!(gallery.overlay().last_len, 0);
}

// ===== scroll intents =====

#[test]
fn first_append_after_reset_scrolls_below_fold() {
    let mut gallery = gallery();
    gallery.append(&records(0..10));
    assert_eq!(gallery.pending_scroll(), Some(ScrollIntent::BelowFold));

    let offset = gallery.resolve_scroll(20, gallery.content_rows());
    assert_eq!(offset, 2 * CARD_HEIGHT as usize);
}

#[test]
fn later_appends_reveal_newest() {
    let mut gallery = gallery();
    gallery.append(&records(0..10));
    gallery.resolve_scroll(20, gallery.content_rows());

    gallery.append(&records(10..20));
    assert_eq!(gallery.pending_scroll(), Some(ScrollIntent::RevealNewest));

    let total = gallery.content_rows() + 3;
    let offset = gallery.resolve_scroll(20, total);
    assert_eq!(
        offset,
        gallery.content_rows() - 20,
        "last card meets bottom of viewport, footer stays below"
    );
}

#[test]
fn new_session_scrolls_below_fold_again() {
    let mut gallery = gallery();
    gallery.append(&records(0..10));
    gallery.append(&records(10..20));
    gallery.reset();
    gallery.append(&records(0..10));

    assert_eq!(gallery.pending_scroll(), Some(ScrollIntent::BelowFold));
}

#[test]
fn empty_append_requests_no_scroll() {
    let mut gallery = gallery();
    gallery.append(&[]);
    assert_eq!(gallery.pending_scroll(), None);
}

#[test]
fn below_fold_is_clamped_for_short_content() {
    let mut gallery = gallery();
    gallery.append(&records(0..2));

    let offset = gallery.resolve_scroll(20, gallery.content_rows());
    assert_eq!(offset, 0, "content shorter than viewport cannot scroll");
}

#[test]
fn pending_scroll_is_consumed_once() {
    let mut gallery = gallery();
    gallery.append(&records(0..10));
    gallery.resolve_scroll(20, gallery.content_rows());
    let first = gallery.scroll_offset();

    gallery.resolve_scroll(20, gallery.content_rows());
    assert_eq!(gallery.scroll_offset(), first);
}

// ===== manual scrolling =====

#[test]
fn scroll_to_bottom_clamps_to_max() {
    let mut gallery = gallery();
    gallery.append(&records(0..10));
    gallery.resolve_scroll(10, gallery.content_rows());

    gallery.scroll_to_bottom();
    let offset = gallery.resolve_scroll(10, gallery.content_rows());
    assert_eq!(offset, gallery.content_rows() - 10);
}

#[test]
fn scroll_up_saturates_at_zero() {
    let mut gallery = gallery();
    gallery.scroll_up(5);
    assert_eq!(gallery.scroll_offset(), 0);
}

#[test]
fn first_visible_entry_follows_offset() {
    let mut gallery = gallery();
    assert_eq!(gallery.first_visible_entry(), None);

    gallery.append(&records(0..10));
    gallery.scroll_to_top();
    assert_eq!(gallery.first_visible_entry(), Some(0));

    gallery.scroll_down(CARD_HEIGHT as usize);
    assert_eq!(gallery.first_visible_entry(), Some(1));

    gallery.scroll_down(1);
    assert_eq!(gallery.first_visible_entry(), Some(2), "partially hidden card is skipped");
}
