//! Bookkeeping for a browser host: element handles and installed timers.
//!
//! Kept free of web-sys so it can be tested natively.

use std::collections::HashMap;

use crate::core::{TimerId, TimerKind};

/// Live elements keyed by the handle written onto each of them.
///
/// Keys are never reused, so a stale key on a detached element can not
/// alias a newer one.
#[derive(Debug)]
pub struct HandleTable<E> {
    next: u32,
    entries: HashMap<u32, E>,
}

impl<E> Default for HandleTable<E> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: HashMap::new(),
        }
    }
}

impl<E: PartialEq> HandleTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key read back from an element, if it still names that element.
    pub fn lookup(&self, stored: Option<&str>, element: &E) -> Option<u32> {
        let key = stored?.parse::<u32>().ok()?;
        (self.entries.get(&key) == Some(element)).then_some(key)
    }

    pub fn insert(&mut self, element: E) -> u32 {
        let key = self.next;
        self.next += 1;
        self.entries.insert(key, element);
        key
    }

    pub fn get(&self, key: u32) -> Option<&E> {
        self.entries.get(&key)
    }

    /// Drop the entry named by a stored key; unreadable keys are ignored.
    pub fn forget(&mut self, stored: &str) {
        if let Ok(key) = stored.parse::<u32>() {
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Browser timer handles by scheduler id.
#[derive(Debug, Default)]
pub struct InstalledTimers {
    timers: HashMap<TimerId, (TimerKind, i32)>,
}

impl InstalledTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, id: TimerId, kind: TimerKind, handle: i32) {
        self.timers.insert(id, (kind, handle));
    }

    /// A timer callback ran. One-shot timeouts are gone from the browser now.
    pub fn fired(&mut self, id: TimerId) {
        if let Some((TimerKind::Timeout, _)) = self.timers.get(&id) {
            self.timers.remove(&id);
        }
    }

    /// Remove a timer so the host can clear it.
    pub fn cancel(&mut self, id: TimerId) -> Option<(TimerKind, i32)> {
        self.timers.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
