//! Load-more triggers.
//!
//! Two producers feed the same `load_more` path: the manual control and an
//! automatic observer that fires when the control scrolls into view. Only the
//! configured one is live.

use serde::Deserialize;

/// Default fraction of the control that must be visible to fire.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Which trigger drives `load_more`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMoreMode {
    /// User activates the load-more control.
    #[default]
    Button,
    /// Control visibility in the viewport fires the load.
    Auto,
}

impl LoadMoreMode {
    /// Parse a mode name (`"button"` or `"auto"`, case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "button" => Some(Self::Button),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Half-open span of rows `[start, start + len)` in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First row
    pub start: usize,
    /// Number of rows
    pub len: usize,
}

impl RowSpan {
    /// Span of `len` rows starting at `start`.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last row.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }
}

/// Fraction of `target` inside `viewport` grown by `margin` rows on both
/// edges. Empty targets are never visible.
pub fn intersection_ratio(target: RowSpan, viewport: RowSpan, margin: usize) -> f32 {
    if target.len == 0 {
        return 0.0;
    }
    let root_start = viewport.start.saturating_sub(margin);
    let root_end = viewport.end().saturating_add(margin);

    let start = target.start.max(root_start);
    let end = target.end().min(root_end);
    let visible = end.saturating_sub(start);

    visible as f32 / target.len as f32
}

/// Viewport-intersection observer for the load-more control.
///
/// Edge triggered: fires when a sample crosses into `ratio >= threshold`.
/// The first sample after [`VisibilityObserver::observe`] fires if the control
/// is already visible enough.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityObserver {
    threshold: f32,
    root_margin: usize,
    observing: bool,
    last_intersecting: Option<bool>,
}

impl VisibilityObserver {
    /// Create an observer that is not yet observing.
    pub fn new(threshold: f32, root_margin: usize) -> Self {
        Self {
            threshold,
            root_margin,
            observing: false,
            last_intersecting: None,
        }
    }

    /// Ratio at or above which the control counts as visible.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Rows added to both viewport edges.
    pub fn root_margin(&self) -> usize {
        self.root_margin
    }

    /// True between `observe` and `unobserve`.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Start watching the control.
    pub fn observe(&mut self) {
        self.observing = true;
        self.last_intersecting = None;
    }

    /// Stop watching the control. Samples are ignored until the next `observe`.
    pub fn unobserve(&mut self) {
        self.observing = false;
        self.last_intersecting = None;
    }

    /// Feed a visibility ratio; returns true when the observer fires.
    pub fn sample(&mut self, ratio: f32) -> bool {
        if !self.observing {
            return false;
        }
        let intersecting = ratio >= self.threshold;
        let was_intersecting = self.last_intersecting.replace(intersecting);
        intersecting && was_intersecting != Some(true)
    }

    /// Sample using geometry instead of a precomputed ratio.
    pub fn sample_geometry(&mut self, target: RowSpan, viewport: RowSpan) -> bool {
        let ratio = intersection_ratio(target, viewport, self.root_margin);
        self.sample(ratio)
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD, 0)
    }
}

/// The active trigger.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadMoreTrigger {
    /// Button or click
    #[default]
    Manual,
    /// Fires when the control scrolls into view
    Auto(VisibilityObserver),
}

impl LoadMoreTrigger {
    /// Config-level mode of this trigger.
    pub fn mode(&self) -> LoadMoreMode {
        match self {
            Self::Manual => LoadMoreMode::Button,
            Self::Auto(_) => LoadMoreMode::Auto,
        }
    }

    /// The observer in auto mode.
    pub fn observer(&self) -> Option<&VisibilityObserver> {
        match self {
            Self::Manual => None,
            Self::Auto(observer) => Some(observer),
        }
    }

    pub(crate) fn observe(&mut self) {
        if let Self::Auto(observer) = self {
            observer.observe();
        }
    }

    pub(crate) fn unobserve(&mut self) {
        if let Self::Auto(observer) = self {
            observer.unobserve();
        }
    }
}
