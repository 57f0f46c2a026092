//! Header reaction to page scrolling.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent};
use crate::dom::{classes, Dom};
use crate::widgets::HeaderScrollState;

pub struct ScrollEffectsController<D: Dom> {
    header: D::Node,
    state: HeaderScrollState,
}

impl<D: Dom> ScrollEffectsController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let header = ctx.dom.query(&config.selectors.header)?;
        Some(Self {
            header,
            state: HeaderScrollState::new(
                config.scroll.scrolled_threshold,
                config.scroll.hide_threshold,
            ),
        })
    }
}

impl<D: Dom> Controller<D> for ScrollEffectsController<D> {
    fn name(&self) -> &'static str {
        "scroll-effects"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        if !matches!(event, PageEvent::Scroll) {
            return EventResult::Ignored;
        }

        // One layout read per scroll
        let visual = self.state.update(ctx.dom.scroll_y());
        ctx.dom.set_class(self.header, classes::SCROLLED, visual.scrolled);
        ctx.dom.set_class(self.header, classes::HIDDEN, visual.hidden);
        EventResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::testing::*;
    use crate::core::PageEvent;
    use crate::dom::classes::{HIDDEN, SCROLLED};

    fn scroll(page: &mut crate::core::Page<crate::dom::MemoryDom>, y: f64) {
        page.dom_mut().set_scroll_y(y);
        page.dispatch(PageEvent::Scroll);
    }

    #[test]
    fn test_scrolled_iff_past_threshold() {
        let mut page = demo_page();
        for y in [0.0, 50.0, 100.0, 100.5, 250.0, 99.0, 1000.0, 0.0] {
            scroll(&mut page, y);
            assert_eq!(has_class(&page, "header", SCROLLED), y > 100.0, "offset {y}");
        }
    }

    #[test]
    fn test_header_hides_only_moving_down_past_200() {
        let mut page = demo_page();

        scroll(&mut page, 150.0);
        assert!(!has_class(&page, "header", HIDDEN));

        scroll(&mut page, 300.0);
        assert!(has_class(&page, "header", HIDDEN));

        // Same offset again is not downward
        scroll(&mut page, 300.0);
        assert!(!has_class(&page, "header", HIDDEN));

        scroll(&mut page, 400.0);
        assert!(has_class(&page, "header", HIDDEN));

        scroll(&mut page, 350.0);
        assert!(!has_class(&page, "header", HIDDEN));
    }
}
