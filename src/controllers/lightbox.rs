//! Before/after gallery lightbox.

use crate::config::Config;
use crate::core::{Controller, EventResult, Overlay, PageContext, PageEvent};
use crate::dom::{classes, Dom};
use crate::widgets::{CyclicIndex, OpenState, Transition};

pub struct LightboxController<D: Dom> {
    items: Vec<D::Node>,
    lightbox: D::Node,
    image: Option<D::Node>,
    close: Option<D::Node>,
    prev: Option<D::Node>,
    next: Option<D::Node>,
    index: CyclicIndex,
    state: OpenState,
}

impl<D: Dom> LightboxController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let selectors = &config.selectors;
        let lightbox = ctx.dom.query(&selectors.lightbox)?;
        let items = ctx.dom.query_all(&selectors.gallery_items);

        Some(Self {
            index: CyclicIndex::new(items.len()),
            items,
            lightbox,
            image: ctx.dom.query(&selectors.lightbox_image),
            close: ctx.dom.query(&selectors.lightbox_close),
            prev: ctx.dom.query(&selectors.lightbox_prev),
            next: ctx.dom.query(&selectors.lightbox_next),
            state: OpenState::default(),
        })
    }

    pub fn current_index(&self) -> usize {
        self.index.get()
    }

    /// Point the lightbox image at the current gallery item's picture.
    fn show_current(&self, ctx: &mut PageContext<D>) {
        let (Some(image), Some(&item)) = (self.image, self.items.get(self.index.get())) else {
            return;
        };
        let src = ctx
            .dom
            .query_within(item, "img")
            .and_then(|picture| ctx.dom.attribute(picture, "src"));
        if let Some(src) = src {
            ctx.dom.set_attribute(image, "src", &src);
        }
    }

    fn apply(&self, transition: Transition, ctx: &mut PageContext<D>) {
        if !transition.changed() {
            return;
        }
        let open = self.state.is_open();
        ctx.dom.set_class(self.lightbox, classes::ACTIVE, open);
        if open {
            ctx.overlays.open(Overlay::Lightbox, &mut ctx.dom);
        } else {
            ctx.overlays.close(Overlay::Lightbox, &mut ctx.dom);
        }
        tracing::debug!(open, index = self.index.get(), "lightbox");
    }

    fn is(&self, control: Option<D::Node>, target: D::Node, ctx: &PageContext<D>) -> bool {
        control.is_some_and(|control| ctx.dom.contains(control, target))
    }
}

impl<D: Dom> Controller<D> for LightboxController<D> {
    fn name(&self) -> &'static str {
        "lightbox"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Click { target } = *event else {
            return EventResult::Ignored;
        };

        if self.is(self.close, target, ctx) || target == self.lightbox {
            let transition = self.state.close();
            self.apply(transition, ctx);
            return EventResult::Handled;
        }

        if self.is(self.prev, target, ctx) {
            self.index.prev();
            self.show_current(ctx);
            return EventResult::Handled;
        }

        if self.is(self.next, target, ctx) {
            self.index.next();
            self.show_current(ctx);
            return EventResult::Handled;
        }

        if let Some(position) = super::hit(&ctx.dom, &self.items, target) {
            self.index.select(position);
            self.show_current(ctx);
            let transition = self.state.open();
            self.apply(transition, ctx);
            return EventResult::Handled;
        }

        EventResult::Ignored
    }
}
