//! What should happen after a controller handles an event.
//!
//! `Page` merges the results of every controller; the host only needs to
//! know whether to cancel the browser's default action.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EventResult {
    /// The event was not for this controller
    #[default]
    Ignored,
    /// State changed (or was re-rendered); default action may proceed
    Handled,
    /// Handled, and the browser's default action must be suppressed
    PreventDefault,
}

impl EventResult {
    /// Combine two results, keeping the stronger one.
    pub fn merge(self, other: EventResult) -> EventResult {
        self.max(other)
    }

    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    pub fn prevents_default(&self) -> bool {
        matches!(self, EventResult::PreventDefault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_strongest() {
        assert_eq!(
            EventResult::Ignored.merge(EventResult::Handled),
            EventResult::Handled
        );
        assert_eq!(
            EventResult::PreventDefault.merge(EventResult::Handled),
            EventResult::PreventDefault
        );
        assert!(!EventResult::default().is_handled());
        assert!(EventResult::PreventDefault.prevents_default());
    }
}
