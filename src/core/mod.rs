//! Core page logic layer
//!
//! This module owns everything the controllers share: the event shape,
//! the result of handling an event, the overlay stack, timers, intersection
//! observers and the clock. `Page` mounts the controllers and fans every
//! event out to them.
//! NO imports from the browser host; the `Dom` trait is the only seam.

pub mod clock;
pub mod context;
pub mod event_result;
pub mod events;
pub mod observers;
pub mod overlay;
pub mod page;
pub mod timers;

pub use clock::Clock;
pub use context::PageContext;
pub use event_result::EventResult;
pub use events::PageEvent;
pub use observers::{IntersectionRegistry, ObserverId};
pub use overlay::{Overlay, OverlayStack};
pub use page::{Controller, Page};
pub use timers::{Scheduler, TimerId, TimerKind};
