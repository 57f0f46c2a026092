//! Controllers bind widget state machines to the page.
//!
//! Each controller queries its elements once at attach time and returns
//! `None` when the elements it needs are missing, which disables only that
//! feature. After attach it reacts to `PageEvent`s through the `Controller`
//! trait and renders through the `Dom` trait.

pub mod accordion;
pub mod back_to_top;
pub mod carousel;
pub mod countdown;
pub mod form;
pub mod lightbox;
pub mod modal;
pub mod navigation;
pub mod phone;
pub mod reveal;
pub mod scroll_effects;
pub mod smooth_scroll;

pub use accordion::AccordionController;
pub use back_to_top::BackToTopController;
pub use carousel::CarouselController;
pub use countdown::CountdownController;
pub use form::{FormController, FormPhase};
pub use lightbox::LightboxController;
pub use modal::{BookingFormController, ModalController};
pub use navigation::NavigationController;
pub use phone::PhoneFormatController;
pub use reveal::{LazyLoadController, ScrollAnimationController};
pub use scroll_effects::ScrollEffectsController;
pub use smooth_scroll::SmoothScrollController;

use crate::config::Config;
use crate::core::{Controller, PageContext};
use crate::dom::Dom;

macro_rules! attach_each {
    ($list:ident, $ctx:ident, $config:ident, $($controller:ident),+ $(,)?) => {
        $(
            match $controller::attach($ctx, $config) {
                Some(controller) => $list.push(Box::new(controller)),
                None => tracing::debug!(controller = stringify!($controller), "not attached"),
            }
        )+
    };
}

/// Attach every controller whose elements are present.
///
/// Order is the dispatch order for every later event.
pub fn attach_all<D: Dom + 'static>(
    ctx: &mut PageContext<D>,
    config: &Config,
) -> Vec<Box<dyn Controller<D>>> {
    let mut attached: Vec<Box<dyn Controller<D>>> = Vec::new();
    attach_each!(
        attached,
        ctx,
        config,
        NavigationController,
        ScrollEffectsController,
        SmoothScrollController,
        BackToTopController,
        FormController,
        ModalController,
        BookingFormController,
        LightboxController,
        CarouselController,
        AccordionController,
        LazyLoadController,
        ScrollAnimationController,
        PhoneFormatController,
        CountdownController,
    );
    attached
}

/// Position of the element in `nodes` that is or contains `target`.
pub(crate) fn hit<D: Dom>(dom: &D, nodes: &[D::Node], target: D::Node) -> Option<usize> {
    nodes.iter().position(|&node| dom.contains(node, target))
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, TimeZone, Utc};
    use indextree::NodeId;

    use crate::config::Config;
    use crate::core::{Clock, EventResult, Page, PageEvent};
    use crate::dom::{Dom, MemoryDom, PageFixture};

    /// Mount time of every test page.
    pub fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    pub fn demo_page() -> Page<MemoryDom> {
        let dom = MemoryDom::from_fixture(&PageFixture::demo().unwrap());
        mount(dom)
    }

    pub fn mount(dom: MemoryDom) -> Page<MemoryDom> {
        Page::mount(dom, &Config::default(), Clock::manual_at(start()))
    }

    pub fn node(page: &Page<MemoryDom>, selector: &str) -> NodeId {
        page.dom()
            .query(selector)
            .unwrap_or_else(|| panic!("no element matches {selector}"))
    }

    pub fn nodes(page: &Page<MemoryDom>, selector: &str) -> Vec<NodeId> {
        page.dom().query_all(selector)
    }

    pub fn click(page: &mut Page<MemoryDom>, selector: &str) -> EventResult {
        let target = node(page, selector);
        page.dispatch(PageEvent::click(target))
    }

    pub fn has_class(page: &Page<MemoryDom>, selector: &str, class: &str) -> bool {
        page.dom().has_class(node(page, selector), class)
    }

    pub fn body_has(page: &Page<MemoryDom>, class: &str) -> bool {
        let dom = page.dom();
        dom.has_class(dom.body(), class)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;

    #[test]
    fn test_demo_page_attaches_everything() {
        let page = demo_page();
        assert_eq!(
            page.controller_names(),
            vec![
                "navigation",
                "scroll-effects",
                "smooth-scroll",
                "back-to-top",
                "forms",
                "booking-modal",
                "booking-form",
                "lightbox",
                "testimonials",
                "faq",
                "lazy-load",
                "scroll-animation",
                "phone-format",
                "countdown",
            ]
        );
    }

    #[test]
    fn test_empty_page_attaches_nothing() {
        let page = mount(crate::dom::MemoryDom::new());
        assert!(page.controller_names().is_empty());
    }
}
