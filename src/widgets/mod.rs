//! Widget state structs (rendering-agnostic)
//!
//! This module contains the state machines behind every page widget.
//! These structs hold data and provide methods for state transitions,
//! but never touch the DOM. Controllers in `crate::controllers` read
//! these states and render them through the `Dom` trait.

pub mod accordion;
pub mod booking;
pub mod countdown;
pub mod cyclic;
pub mod form;
pub mod open_state;
pub mod phone;
pub mod scroll;

pub use accordion::{AccordionChange, AccordionState};
pub use booking::{default_time_slots, min_booking_date, time_slot_options, SlotOption};
pub use countdown::{CountdownDisplay, CountdownState, Remaining};
pub use cyclic::CyclicIndex;
pub use form::{FieldErrors, FieldKind, FieldSnapshot, FormValidation, ValidationMessages};
pub use open_state::{OpenState, Transition};
pub use phone::format_phone_input;
pub use scroll::{anchor_id, anchor_scroll_target, BackToTopState, HeaderScrollState, HeaderVisual};
