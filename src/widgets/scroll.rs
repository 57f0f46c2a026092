//! Scroll-driven state: header style/visibility, back-to-top, anchor targets.

/// Visual state the header should show for one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderVisual {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Header scroll tracker
///
/// Remembers the last observed offset so scroll direction can be inferred
/// from the sign of the delta. Each update is O(1).
#[derive(Debug, Clone)]
pub struct HeaderScrollState {
    last_scroll_top: f64,
    scrolled_threshold: f64,
    hide_threshold: f64,
}

impl HeaderScrollState {
    pub fn new(scrolled_threshold: f64, hide_threshold: f64) -> Self {
        Self {
            last_scroll_top: 0.0,
            scrolled_threshold,
            hide_threshold,
        }
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Feed the current offset and get the header visual for it.
    ///
    /// Hidden only while moving down past the hide threshold; an equal
    /// offset counts as "not moving down" and shows the header.
    pub fn update(&mut self, scroll_top: f64) -> HeaderVisual {
        let visual = HeaderVisual {
            scrolled: scroll_top > self.scrolled_threshold,
            hidden: scroll_top > self.last_scroll_top && scroll_top > self.hide_threshold,
        };
        self.last_scroll_top = scroll_top;
        visual
    }
}

/// Back-to-top button visibility.
#[derive(Debug, Clone, Copy)]
pub struct BackToTopState {
    threshold: f64,
}

impl BackToTopState {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn visible_at(&self, scroll_top: f64) -> bool {
        scroll_top > self.threshold
    }
}

/// Extract the fragment id from an in-page link (`#pricing` -> `pricing`).
///
/// Returns `None` for non-fragment links and for a bare `#`.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Where the viewport should land so the target clears the header.
pub fn anchor_scroll_target(target_offset_top: f64, header_height: f64, gap: f64) -> f64 {
    target_offset_top - header_height - gap
}
