//! Back-to-top button.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent};
use crate::dom::{classes, Dom, ScrollBehavior};
use crate::widgets::BackToTopState;

pub struct BackToTopController<D: Dom> {
    button: D::Node,
    state: BackToTopState,
}

impl<D: Dom> BackToTopController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let button = ctx.dom.query(&config.selectors.back_to_top)?;
        Some(Self {
            button,
            state: BackToTopState::new(config.scroll.back_to_top_threshold),
        })
    }
}

impl<D: Dom> Controller<D> for BackToTopController<D> {
    fn name(&self) -> &'static str {
        "back-to-top"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        match *event {
            PageEvent::Scroll => {
                let visible = self.state.visible_at(ctx.dom.scroll_y());
                ctx.dom.set_class(self.button, classes::VISIBLE, visible);
                EventResult::Handled
            }
            PageEvent::Click { target } if ctx.dom.contains(self.button, target) => {
                ctx.dom.scroll_to(0.0, ScrollBehavior::Smooth);
                EventResult::PreventDefault
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::testing::*;
    use crate::core::PageEvent;
    use crate::dom::classes::VISIBLE;
    use crate::dom::{Dom, ScrollBehavior};

    #[test]
    fn test_visibility_threshold() {
        let mut page = demo_page();

        page.dom_mut().set_scroll_y(300.0);
        page.dispatch(PageEvent::Scroll);
        assert!(!has_class(&page, ".back-to-top", VISIBLE));

        page.dom_mut().set_scroll_y(301.0);
        page.dispatch(PageEvent::Scroll);
        assert!(has_class(&page, ".back-to-top", VISIBLE));
    }

    #[test]
    fn test_click_scrolls_home_smoothly() {
        let mut page = demo_page();
        page.dom_mut().set_scroll_y(1500.0);

        let result = click(&mut page, ".back-to-top");
        assert!(result.prevents_default());
        let last = page.dom().last_scroll().unwrap();
        assert_eq!(last.top, 0.0);
        assert_eq!(last.behavior, ScrollBehavior::Smooth);
        assert_eq!(page.dom().scroll_y(), 0.0);
    }
}
