//! Site Controls - interactive behaviour for a marketing site
//!
//! Widget logic (menus, overlays, forms, carousel, accordion, countdowns and
//! friends) lives in plain state machines under `widgets`. Controllers bind
//! them to a page through the `Dom` trait, so the same code drives the live
//! browser page on wasm32 and an in-memory page natively.

pub mod config;
pub mod controllers;
pub mod core;
pub mod dom;
pub mod simulate;
pub mod widgets;

pub use config::Config;
pub use core::{Clock, EventResult, Page, PageEvent};
pub use dom::{Dom, MemoryDom, PageFixture};
