//! Cancellable one-shot timers over a virtual clock.

use tracing::trace;

/// Opaque id of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// What a timer fires for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Advance the active piece one row.
    Drop,
    /// Apply the next staged cascade step.
    CascadeStep,
}

/// Something that can schedule and cancel one-shot timers.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle;

    /// Returns false if the timer already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: u64,
}

/// [`Scheduler`] backed by a millisecond clock that only moves when told to.
///
/// ```
/// use tui_cascade_engine::{Scheduler, TimerKind, TimerQueue};
///
/// let mut timers = TimerQueue::new();
/// let late = timers.schedule(30, TimerKind::Drop);
/// let early = timers.schedule(10, TimerKind::CascadeStep);
///
/// assert_eq!(timers.pop_due(50), Some((early, TimerKind::CascadeStep)));
/// assert_eq!(timers.now_ms(), 10);
/// assert_eq!(timers.pop_due(50), Some((late, TimerKind::Drop)));
/// assert_eq!(timers.pop_due(50), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Live timers of `kind`.
    pub fn count(&self, kind: TimerKind) -> usize {
        self.pending.iter().filter(|t| t.kind == kind).count()
    }

    /// Milliseconds until the earliest live timer fires.
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, TimerKind)> {
        let (index, timer) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, t)| (i, *t))?;
        self.pending.swap_remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some((timer.handle, timer.kind))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Cancel every live timer. The clock keeps its value.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let due_ms = self.now_ms + u64::from(delay_ms);
        self.pending.push(Timer {
            handle,
            kind,
            due_ms,
        });
        trace!(id = handle.0, ?kind, due_ms, "timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(index) = self.pending.iter().position(|t| t.handle == handle) else {
            return false;
        };
        self.pending.swap_remove(index);
        trace!(id = handle.0, "timer cancelled");
        true
    }
}
