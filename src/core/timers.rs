//! Timer bookkeeping for intervals and one-shot delays.
//!
//! Controllers ask the scheduler for timers and keep the returned ids.
//! Headless runs drive the scheduler with `pop_due`; a scheduler built with
//! `for_host` also records every change so the browser host can drain
//! `take_created`/`take_cancelled` and install real timers that dispatch
//! `PageEvent::Timer` when they fire.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Interval,
    Timeout,
}

/// A timer as the host needs to install it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    pub id: TimerId,
    pub kind: TimerKind,
    pub period_ms: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    spec: TimerSpec,
    due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
    created: Vec<TimerSpec>,
    cancelled: Vec<TimerId>,
    queue_for_host: bool,
}

impl Scheduler {
    /// Headless scheduler; nothing is queued for a host.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_host() -> Self {
        Self {
            queue_for_host: true,
            ..Self::default()
        }
    }

    /// Milliseconds of scheduler time elapsed since the page mounted.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn set_interval(&mut self, period_ms: u64) -> TimerId {
        self.schedule(TimerKind::Interval, period_ms)
    }

    pub fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.schedule(TimerKind::Timeout, delay_ms)
    }

    fn schedule(&mut self, kind: TimerKind, period_ms: u64) -> TimerId {
        self.next_id += 1;
        let spec = TimerSpec {
            id: TimerId(self.next_id),
            kind,
            period_ms,
        };
        self.entries.push(Entry {
            spec,
            due_ms: self.now_ms.saturating_add(period_ms),
        });
        if self.queue_for_host {
            self.created.push(spec);
        }
        tracing::trace!(id = spec.id.0, ?kind, period_ms, "timer scheduled");
        spec.id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.spec.id != id);
        let removed = self.entries.len() != before;
        if removed && self.queue_for_host {
            let before_created = self.created.len();
            self.created.retain(|spec| spec.id != id);
            // Never installed by the host, so nothing to clear there.
            if self.created.len() == before_created {
                self.cancelled.push(id);
            }
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.spec.id == id)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Intervals are rescheduled, timeouts retired.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= until_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.spec.id))
            .map(|(position, _)| position)?;

        let entry = &mut self.entries[position];
        let id = entry.spec.id;
        self.now_ms = self.now_ms.max(entry.due_ms);
        match entry.spec.kind {
            TimerKind::Interval => {
                entry.due_ms = entry.due_ms.saturating_add(entry.spec.period_ms.max(1))
            }
            TimerKind::Timeout => {
                self.entries.remove(position);
            }
        }
        Some(id)
    }

    /// Move scheduler time forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Host-driven timers report a fire here so timeouts are retired.
    pub fn mark_fired(&mut self, id: TimerId) {
        self.entries
            .retain(|entry| !(entry.spec.id == id && entry.spec.kind == TimerKind::Timeout));
    }

    pub fn take_created(&mut self) -> Vec<TimerSpec> {
        std::mem::take(&mut self.created)
    }

    pub fn take_cancelled(&mut self) -> Vec<TimerId> {
        std::mem::take(&mut self.cancelled)
    }
}
