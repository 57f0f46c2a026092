//! Open/closed state shared by the mobile menu, booking modal and lightbox.

/// Result of asking an [`OpenState`] to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    /// The requested state was already in effect.
    Unchanged,
}

impl Transition {
    pub fn changed(self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

/// Boolean open flag with idempotent open/close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenState {
    open: bool,
}

impl OpenState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> Transition {
        if self.open {
            Transition::Unchanged
        } else {
            self.open = true;
            Transition::Opened
        }
    }

    pub fn close(&mut self) -> Transition {
        if self.open {
            self.open = false;
            Transition::Closed
        } else {
            Transition::Unchanged
        }
    }

    pub fn toggle(&mut self) -> Transition {
        if self.open {
            self.close()
        } else {
            self.open()
        }
    }
}
