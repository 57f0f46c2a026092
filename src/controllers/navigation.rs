//! Mobile navigation menu.

use crate::config::Config;
use crate::core::{Controller, EventResult, Overlay, PageContext, PageEvent};
use crate::dom::{classes, Dom};
use crate::widgets::{OpenState, Transition};

/// Menu button toggles the menu; the overlay and every nav link close it.
pub struct NavigationController<D: Dom> {
    button: D::Node,
    menu: D::Node,
    overlay: Option<D::Node>,
    links: Vec<D::Node>,
    state: OpenState,
}

impl<D: Dom> NavigationController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let selectors = &config.selectors;
        let button = ctx.dom.query(&selectors.mobile_menu_button)?;
        let menu = ctx.dom.query(&selectors.nav_menu)?;

        Some(Self {
            button,
            menu,
            overlay: ctx.dom.query(&selectors.nav_overlay),
            links: ctx.dom.query_all(&selectors.nav_links),
            state: OpenState::default(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn apply(&self, transition: Transition, ctx: &mut PageContext<D>) {
        if !transition.changed() {
            return;
        }
        let open = self.state.is_open();
        ctx.dom.set_class(self.menu, classes::ACTIVE, open);
        ctx.dom.set_class(self.button, classes::ACTIVE, open);
        if open {
            ctx.overlays.open(Overlay::Navigation, &mut ctx.dom);
        } else {
            ctx.overlays.close(Overlay::Navigation, &mut ctx.dom);
        }
        tracing::debug!(open, "navigation menu");
    }
}

impl<D: Dom> Controller<D> for NavigationController<D> {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Click { target } = *event else {
            return EventResult::Ignored;
        };

        if ctx.dom.contains(self.button, target) {
            let transition = self.state.toggle();
            self.apply(transition, ctx);
            return EventResult::Handled;
        }

        let on_overlay = self
            .overlay
            .is_some_and(|overlay| ctx.dom.contains(overlay, target));
        if on_overlay || super::hit(&ctx.dom, &self.links, target).is_some() {
            let transition = self.state.close();
            self.apply(transition, ctx);
            return EventResult::Handled;
        }

        EventResult::Ignored
    }
}
