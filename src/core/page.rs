//! Page: mounts every controller and routes events to them.

use super::clock::Clock;
use super::context::PageContext;
use super::event_result::EventResult;
use super::events::PageEvent;
use super::timers::TimerId;
use crate::config::Config;
use crate::controllers;
use crate::dom::Dom;

/// One widget's event handling.
///
/// Controllers are attached once at mount and own their element handles and
/// state; they never call each other.
pub trait Controller<D: Dom> {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// React to an event. Events for other widgets return `Ignored`.
    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult;
}

pub struct Page<D: Dom> {
    ctx: PageContext<D>,
    controllers: Vec<Box<dyn Controller<D>>>,
    clock_synced_ms: u64,
}

impl<D: Dom + 'static> Page<D> {
    /// Attach every controller whose elements exist on the page.
    pub fn mount(dom: D, config: &Config, clock: Clock) -> Self {
        Self::attach(PageContext::new(dom, clock), config)
    }

    /// Like `mount`, but timers and observers are left for a host to install.
    pub fn mount_for_host(dom: D, config: &Config, clock: Clock) -> Self {
        Self::attach(PageContext::for_host(dom, clock), config)
    }

    fn attach(mut ctx: PageContext<D>, config: &Config) -> Self {
        let controllers = controllers::attach_all(&mut ctx, config);

        let names: Vec<&str> = controllers.iter().map(|c| c.name()).collect();
        tracing::info!(count = controllers.len(), ?names, "page mounted");

        Self {
            ctx,
            controllers,
            clock_synced_ms: 0,
        }
    }

    /// Deliver one event to every controller, in attach order.
    pub fn dispatch(&mut self, event: PageEvent<D::Node>) -> EventResult {
        let mut result = EventResult::Ignored;
        for controller in &mut self.controllers {
            let outcome = controller.handle(&event, &mut self.ctx);
            if outcome.is_handled() {
                tracing::trace!(
                    controller = controller.name(),
                    event = event.kind(),
                    ?outcome,
                    "event handled"
                );
            }
            result = result.merge(outcome);
        }
        result
    }

    /// Run scheduler time forward by `ms`, firing every timer that comes due.
    /// Returns how many timer events were dispatched.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.ctx.timers.now_ms().saturating_add(ms);
        let mut fired = 0;
        while let Some(id) = self.ctx.timers.pop_due(target) {
            self.sync_clock();
            self.dispatch(PageEvent::Timer(id));
            fired += 1;
        }
        self.ctx.timers.set_now(target);
        self.sync_clock();
        fired
    }

    /// Entry point for host-driven timers.
    pub fn fire_timer(&mut self, id: TimerId) -> EventResult {
        self.ctx.timers.mark_fired(id);
        self.dispatch(PageEvent::Timer(id))
    }

    /// Report `node` entering or leaving the viewport to whoever observes it.
    pub fn intersect(&mut self, node: D::Node, intersecting: bool) -> EventResult {
        let observers = self.ctx.observers.observers_of(node);
        observers
            .into_iter()
            .map(|observer| self.dispatch(PageEvent::intersection(observer, node, intersecting)))
            .fold(EventResult::Ignored, EventResult::merge)
    }

    fn sync_clock(&mut self) {
        let now = self.ctx.timers.now_ms();
        self.ctx.clock.advance(now - self.clock_synced_ms);
        self.clock_synced_ms = now;
    }

    pub fn dom(&self) -> &D {
        &self.ctx.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.ctx.dom
    }

    pub fn context(&self) -> &PageContext<D> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut PageContext<D> {
        &mut self.ctx
    }

    pub fn controller_names(&self) -> Vec<&'static str> {
        self.controllers.iter().map(|c| c.name()).collect()
    }
}
