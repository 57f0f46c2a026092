//! Overlay stack behind the body-level lock classes.
//!
//! Several controllers lock the page (`nav-open`, `modal-open`). Instead of
//! each toggling the body class directly, they register the overlay they
//! own here and the body classes are derived from the whole set, so closing
//! one overlay never unlocks the page for another.

use crate::dom::{classes, Dom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Navigation,
    BookingModal,
    Lightbox,
}

impl Overlay {
    pub fn body_class(self) -> &'static str {
        match self {
            Overlay::Navigation => classes::NAV_OPEN,
            Overlay::BookingModal | Overlay::Lightbox => classes::MODAL_OPEN,
        }
    }
}

const BODY_CLASSES: [&str; 2] = [classes::NAV_OPEN, classes::MODAL_OPEN];

/// Active overlays in the order they were opened
#[derive(Debug, Clone, Default)]
pub struct OverlayStack {
    active: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.active.contains(&overlay)
    }

    pub fn top(&self) -> Option<Overlay> {
        self.active.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn open<D: Dom>(&mut self, overlay: Overlay, dom: &mut D) {
        if !self.is_open(overlay) {
            self.active.push(overlay);
        }
        self.sync(dom);
    }

    pub fn close<D: Dom>(&mut self, overlay: Overlay, dom: &mut D) {
        self.active.retain(|&active| active != overlay);
        self.sync(dom);
    }

    fn sync<D: Dom>(&self, dom: &mut D) {
        let body = dom.body();
        for class in BODY_CLASSES {
            let needed = self.active.iter().any(|overlay| overlay.body_class() == class);
            dom.set_class(body, class, needed);
        }
    }
}
