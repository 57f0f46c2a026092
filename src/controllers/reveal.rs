//! Viewport-triggered work: deferred images and entrance animations.

use crate::config::Config;
use crate::core::{Controller, EventResult, ObserverId, PageContext, PageEvent};
use crate::dom::{classes, Dom};

const DEFERRED_SOURCE: &str = "data-src";

/// Swaps in the real image source the first time an image is seen, then
/// stops watching it.
pub struct LazyLoadController<D: Dom> {
    observer: ObserverId,
    loaded: Vec<D::Node>,
}

impl<D: Dom> LazyLoadController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let images = ctx.dom.query_all(&config.selectors.lazy_images);
        if images.is_empty() {
            return None;
        }

        let observer = ctx.observers.create(0.0);
        for image in images {
            ctx.observers.observe(observer, image);
        }
        Some(Self {
            observer,
            loaded: Vec::new(),
        })
    }

    pub fn loaded(&self) -> &[D::Node] {
        &self.loaded
    }
}

impl<D: Dom> Controller<D> for LazyLoadController<D> {
    fn name(&self) -> &'static str {
        "lazy-load"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Intersection {
            observer,
            target,
            intersecting: true,
        } = *event
        else {
            return EventResult::Ignored;
        };
        if observer != self.observer {
            return EventResult::Ignored;
        }

        if let Some(source) = ctx.dom.attribute(target, DEFERRED_SOURCE) {
            ctx.dom.set_attribute(target, "src", &source);
            tracing::debug!(%source, "lazy image loaded");
        }
        ctx.dom.remove_class(target, classes::LAZY);
        ctx.observers.unobserve(self.observer, target);
        self.loaded.push(target);
        EventResult::Handled
    }
}

/// Marks elements as animated whenever they come into view.
///
/// Elements stay observed, so leaving and re-entering triggers again; adding
/// the class a second time changes nothing.
pub struct ScrollAnimationController {
    observer: ObserverId,
}

impl ScrollAnimationController {
    pub fn attach<D: Dom>(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let targets = ctx.dom.query_all(&config.selectors.animate_on_scroll);
        if targets.is_empty() {
            return None;
        }

        let observer = ctx.observers.create(config.scroll.animation_threshold);
        for target in targets {
            ctx.observers.observe(observer, target);
        }
        Some(Self { observer })
    }
}

impl<D: Dom> Controller<D> for ScrollAnimationController {
    fn name(&self) -> &'static str {
        "scroll-animation"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        match *event {
            PageEvent::Intersection {
                observer,
                target,
                intersecting: true,
            } if observer == self.observer => {
                ctx.dom.add_class(target, classes::ANIMATED);
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::testing::*;
    use crate::core::EventResult;
    use crate::dom::classes::{ANIMATED, LAZY};
    use crate::dom::Dom;

    #[test]
    fn test_lazy_image_loads_once() {
        let mut page = demo_page();
        let image = nodes(&page, "img[data-src]")[0];

        assert_eq!(page.intersect(image, false), EventResult::Ignored);
        assert!(page.dom().has_class(image, LAZY));

        assert_eq!(page.intersect(image, true), EventResult::Handled);
        assert_eq!(
            page.dom().attribute(image, "src").as_deref(),
            Some("/img/services-1.jpg")
        );
        assert!(!page.dom().has_class(image, LAZY));
        assert!(page.context().observers.observers_of(image).is_empty());

        // No longer observed: nothing is delivered
        page.dom_mut().set_attribute(image, "src", "/img/swapped.jpg");
        assert_eq!(page.intersect(image, true), EventResult::Ignored);
        assert_eq!(
            page.dom().attribute(image, "src").as_deref(),
            Some("/img/swapped.jpg")
        );
    }

    #[test]
    fn test_animation_retriggers_idempotently() {
        let mut page = demo_page();
        let section = node(&page, ".animate-on-scroll");

        assert_eq!(page.intersect(section, true), EventResult::Handled);
        assert!(page.dom().has_class(section, ANIMATED));

        page.intersect(section, false);
        assert_eq!(page.intersect(section, true), EventResult::Handled);
        assert!(page.dom().has_class(section, ANIMATED));
        assert_eq!(page.context().observers.observers_of(section).len(), 1);
    }

    #[test]
    fn test_animation_threshold_from_config() {
        let page = demo_page();
        let section = node(&page, ".animate-on-scroll");
        let observer = page.context().observers.observers_of(section)[0];
        assert_eq!(page.context().observers.threshold(observer), Some(0.1));
    }
}
