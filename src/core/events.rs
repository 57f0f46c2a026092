//! Host-agnostic page events.
//!
//! The browser host and the headless simulator both translate what happens
//! on the page into this enum, so controllers only handle one event shape.

use super::observers::ObserverId;
use super::timers::TimerId;

/// Event delivered to every controller
///
/// `N` is the DOM's node handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent<N> {
    /// Pointer click; `target` is the innermost element hit
    Click { target: N },
    /// Form submission
    Submit { form: N },
    /// Keystroke-level edit of a form control
    Input { target: N },
    /// Committed change of a select or date control
    Change { target: N },
    /// Viewport scrolled; read the offset from the DOM
    Scroll,
    /// A scheduled timer fired
    Timer(TimerId),
    /// An observed element crossed the viewport edge
    Intersection {
        observer: ObserverId,
        target: N,
        intersecting: bool,
    },
}

impl<N> PageEvent<N> {
    pub fn click(target: N) -> Self {
        Self::Click { target }
    }

    pub fn submit(form: N) -> Self {
        Self::Submit { form }
    }

    pub fn input(target: N) -> Self {
        Self::Input { target }
    }

    pub fn change(target: N) -> Self {
        Self::Change { target }
    }

    pub fn intersection(observer: ObserverId, target: N, intersecting: bool) -> Self {
        Self::Intersection {
            observer,
            target,
            intersecting,
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Submit { .. } => "submit",
            Self::Input { .. } => "input",
            Self::Change { .. } => "change",
            Self::Scroll => "scroll",
            Self::Timer(_) => "timer",
            Self::Intersection { .. } => "intersection",
        }
    }
}
