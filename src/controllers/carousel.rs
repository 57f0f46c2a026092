//! Testimonial carousel.
//!
//! Advances on a fixed interval and jumps directly when a dot is clicked.
//! The two triggers are independent: a dot click does not restart the
//! interval.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent, TimerId};
use crate::dom::{classes, Dom};
use crate::widgets::CyclicIndex;

pub struct CarouselController<D: Dom> {
    slider: D::Node,
    dots: Vec<D::Node>,
    index: CyclicIndex,
    timer: TimerId,
}

impl<D: Dom> CarouselController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let selectors = &config.selectors;
        let slider = ctx.dom.query(&selectors.testimonial_slider)?;
        let items = ctx.dom.query_all(&selectors.testimonial_items);
        if items.is_empty() {
            return None;
        }

        Some(Self {
            slider,
            dots: ctx.dom.query_all(&selectors.testimonial_dots),
            index: CyclicIndex::new(items.len()),
            timer: ctx.timers.set_interval(config.timing.carousel_interval_ms),
        })
    }

    pub fn current_index(&self) -> usize {
        self.index.get()
    }

    fn render(&self, ctx: &mut PageContext<D>) {
        let current = self.index.get();
        let offset = format!("translateX(-{}%)", current * 100);
        ctx.dom.set_style(self.slider, "transform", Some(&offset));
        for (position, &dot) in self.dots.iter().enumerate() {
            ctx.dom.set_class(dot, classes::ACTIVE, position == current);
        }
    }
}

impl<D: Dom> Controller<D> for CarouselController<D> {
    fn name(&self) -> &'static str {
        "testimonials"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        match *event {
            PageEvent::Timer(id) if id == self.timer => {
                let current = self.index.next();
                tracing::trace!(current, "testimonial auto-advance");
                self.render(ctx);
                EventResult::Handled
            }
            PageEvent::Click { target } => {
                let Some(position) = super::hit(&ctx.dom, &self.dots, target) else {
                    return EventResult::Ignored;
                };
                // Dots past the last testimonial select nothing
                if self.index.select(position) {
                    tracing::debug!(current = position, "testimonial selected");
                    self.render(ctx);
                }
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::testing::*;
    use crate::core::{Page, PageEvent};
    use crate::dom::classes::ACTIVE;
    use crate::dom::{ElementSpec, MemoryDom};

    fn transform(page: &Page<MemoryDom>) -> Option<String> {
        page.dom().style(node(page, ".testimonial-slider"), "transform")
    }

    fn active_dots(page: &Page<MemoryDom>) -> Vec<usize> {
        use crate::dom::Dom;
        nodes(page, ".testimonial-dot")
            .into_iter()
            .enumerate()
            .filter(|&(_, dot)| page.dom().has_class(dot, ACTIVE))
            .map(|(position, _)| position)
            .collect()
    }

    #[test]
    fn test_auto_advance_every_five_seconds() {
        let mut page = demo_page();
        assert_eq!(transform(&page), None);

        page.advance(4999);
        assert_eq!(transform(&page), None);

        page.advance(1);
        assert_eq!(transform(&page).as_deref(), Some("translateX(-100%)"));
        assert_eq!(active_dots(&page), vec![1]);

        page.advance(5000);
        assert_eq!(transform(&page).as_deref(), Some("translateX(-200%)"));
        assert_eq!(active_dots(&page), vec![2]);
    }

    #[test]
    fn test_n_advances_return_to_start() {
        let mut page = demo_page();
        page.advance(3 * 5000);
        assert_eq!(transform(&page).as_deref(), Some("translateX(-0%)"));
        assert_eq!(active_dots(&page), vec![0]);
    }

    #[test]
    fn test_dot_selects_without_resetting_timer() {
        let mut page = demo_page();
        page.advance(3000);

        let third = nodes(&page, ".testimonial-dot")[2];
        page.dispatch(PageEvent::click(third));
        assert_eq!(transform(&page).as_deref(), Some("translateX(-200%)"));
        assert_eq!(active_dots(&page), vec![2]);

        // Interval still fires at t=5000 and wraps to the first slide
        page.advance(2000);
        assert_eq!(transform(&page).as_deref(), Some("translateX(-0%)"));
        assert_eq!(active_dots(&page), vec![0]);
    }

    #[test]
    fn test_extra_dot_is_ignored() {
        let slider = ElementSpec::new("div")
            .with_class("testimonial-slider")
            .with_child(ElementSpec::new("div").with_class("testimonial-item"))
            .with_child(ElementSpec::new("div").with_class("testimonial-item"));
        let mut dom = MemoryDom::new();
        let body = crate::dom::Dom::body(&dom);
        dom.insert_spec(body, &slider);
        for _ in 0..3 {
            dom.insert_spec(body, &ElementSpec::new("span").with_class("testimonial-dot"));
        }
        let mut page = mount(dom);

        let extra = nodes(&page, ".testimonial-dot")[2];
        page.dispatch(PageEvent::click(extra));
        assert_eq!(transform(&page), None);
    }

    #[test]
    fn test_slider_without_items_not_attached() {
        let mut dom = MemoryDom::new();
        let body = crate::dom::Dom::body(&dom);
        dom.insert_spec(body, &ElementSpec::new("div").with_class("testimonial-slider"));
        let page = mount(dom);
        assert!(!page.controller_names().contains(&"testimonials"));
        assert_eq!(page.context().timers.pending(), 0);
    }
}
