//! Shared resources handed to every controller call.

use super::clock::Clock;
use super::observers::IntersectionRegistry;
use super::overlay::OverlayStack;
use super::timers::Scheduler;
use crate::dom::Dom;

/// The page and the services controllers may use while handling an event.
///
/// Only one controller holds this at a time; there is no other writer.
pub struct PageContext<D: Dom> {
    pub dom: D,
    pub overlays: OverlayStack,
    pub timers: Scheduler,
    pub observers: IntersectionRegistry<D::Node>,
    pub clock: Clock,
}

impl<D: Dom> PageContext<D> {
    /// Headless context, driven by `Page::advance` and `Page::intersect`.
    pub fn new(dom: D, clock: Clock) -> Self {
        Self {
            dom,
            overlays: OverlayStack::new(),
            timers: Scheduler::new(),
            observers: IntersectionRegistry::new(),
            clock,
        }
    }

    /// Context whose timer and observer changes are queued for a browser host.
    pub fn for_host(dom: D, clock: Clock) -> Self {
        Self {
            timers: Scheduler::for_host(),
            observers: IntersectionRegistry::for_host(),
            ..Self::new(dom, clock)
        }
    }
}
