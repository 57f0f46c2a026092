//! In-page anchor links scroll smoothly past the sticky header.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent};
use crate::dom::{Dom, ScrollBehavior};
use crate::widgets::{anchor_id, anchor_scroll_target};

pub struct SmoothScrollController<D: Dom> {
    links: Vec<D::Node>,
    header: Option<D::Node>,
    gap: f64,
}

impl<D: Dom> SmoothScrollController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let links = ctx.dom.query_all(&config.selectors.anchor_links);
        if links.is_empty() {
            return None;
        }
        Some(Self {
            links,
            header: ctx.dom.query(&config.selectors.header),
            gap: config.scroll.anchor_gap,
        })
    }
}

impl<D: Dom> Controller<D> for SmoothScrollController<D> {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Click { target } = *event else {
            return EventResult::Ignored;
        };
        let Some(index) = super::hit(&ctx.dom, &self.links, target) else {
            return EventResult::Ignored;
        };

        let link = self.links[index];
        let href = ctx.dom.attribute(link, "href").unwrap_or_default();
        let destination = anchor_id(&href).and_then(|id| ctx.dom.element_by_id(id));

        // Unknown targets still swallow the navigation
        if let Some(destination) = destination {
            let header_height = self
                .header
                .map_or(0.0, |header| ctx.dom.offset_height(header));
            let top = anchor_scroll_target(ctx.dom.offset_top(destination), header_height, self.gap);
            tracing::debug!(%href, top, "anchor scroll");
            ctx.dom.scroll_to(top, ScrollBehavior::Smooth);
        }

        EventResult::PreventDefault
    }
}
