//! Fall cadence: one drop timer, natural or accelerated.

use tracing::trace;

use crate::scheduler::{Scheduler, TimerHandle, TimerKind};
use crate::types::DropMode;

/// Owns the single drop timer of the active piece.
///
/// Every path that schedules a new timer cancels the live one first, so a piece
/// can never be advanced twice by overlapping timers.
#[derive(Debug, Clone)]
pub struct DropScheduler {
    natural_ms: u32,
    soft_ms: u32,
    mode: DropMode,
    live: Option<TimerHandle>,
}

impl DropScheduler {
    pub fn new(natural_ms: u32, soft_ms: u32) -> Self {
        Self {
            natural_ms,
            soft_ms,
            mode: DropMode::Natural,
            live: None,
        }
    }

    pub fn mode(&self) -> DropMode {
        self.mode
    }

    /// Period of the current mode.
    pub fn period_ms(&self) -> u32 {
        match self.mode {
            DropMode::Natural => self.natural_ms,
            DropMode::Accelerated => self.soft_ms,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.live.is_some()
    }

    pub fn live(&self) -> Option<TimerHandle> {
        self.live
    }

    /// Start a fresh period, replacing any live timer.
    pub fn arm(&mut self, scheduler: &mut dyn Scheduler) -> TimerHandle {
        self.disarm(scheduler);
        let handle = scheduler.schedule(self.period_ms(), TimerKind::Drop);
        self.live = Some(handle);
        handle
    }

    /// Cancel the live timer, if any.
    pub fn disarm(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.live.take() {
            Some(handle) => scheduler.cancel(handle),
            None => false,
        }
    }

    /// Switch cadence. Returns false when already in the requested mode.
    ///
    /// A live timer is replaced by one at the new period; a disarmed scheduler
    /// stays disarmed and picks the mode up on the next `arm`.
    pub fn set_soft_drop(&mut self, scheduler: &mut dyn Scheduler, on: bool) -> bool {
        let mode = if on {
            DropMode::Accelerated
        } else {
            DropMode::Natural
        };
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        trace!(?mode, "drop mode changed");
        if self.live.is_some() {
            self.arm(scheduler);
        }
        true
    }

    /// Claim a fired timer. Only the live handle is accepted; anything else is stale.
    pub fn accept(&mut self, handle: TimerHandle) -> bool {
        if self.live == Some(handle) {
            self.live = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Schedule(u32),
        Cancel(u64),
    }

    /// Records calls and tracks how many timers are live.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        live: Vec<u64>,
        next: u64,
    }

    impl Scheduler for Recorder {
        fn schedule(&mut self, delay_ms: u32, _kind: TimerKind) -> TimerHandle {
            self.calls.push(Call::Schedule(delay_ms));
            self.next += 1;
            self.live.push(self.next);
            TimerHandle::new(self.next)
        }

        fn cancel(&mut self, handle: TimerHandle) -> bool {
            self.calls.push(Call::Cancel(handle.id()));
            let before = self.live.len();
            self.live.retain(|&id| id != handle.id());
            self.live.len() != before
        }
    }

    #[test]
    fn arm_cancels_before_scheduling() {
        let mut rec = Recorder::default();
        let mut drop = DropScheduler::new(1000, 50);
        let first = drop.arm(&mut rec);
        drop.arm(&mut rec);
        assert_eq!(
            rec.calls,
            vec![
                Call::Schedule(1000),
                Call::Cancel(first.id()),
                Call::Schedule(1000)
            ]
        );
        assert_eq!(rec.live.len(), 1);
    }

    #[test]
    fn soft_drop_replaces_live_timer() {
        let mut rec = Recorder::default();
        let mut drop = DropScheduler::new(1000, 50);
        let natural = drop.arm(&mut rec);

        assert!(drop.set_soft_drop(&mut rec, true));
        assert_eq!(drop.mode(), DropMode::Accelerated);
        assert_eq!(rec.calls[1..], [Call::Cancel(natural.id()), Call::Schedule(50)]);
        assert_eq!(rec.live.len(), 1);

        assert!(drop.set_soft_drop(&mut rec, false));
        assert_eq!(rec.calls.last(), Some(&Call::Schedule(1000)));
        assert_eq!(rec.live.len(), 1);
    }

    #[test]
    fn repeated_mode_is_a_no_op() {
        let mut rec = Recorder::default();
        let mut drop = DropScheduler::new(1000, 50);
        drop.arm(&mut rec);
        assert!(!drop.set_soft_drop(&mut rec, false));
        assert!(drop.set_soft_drop(&mut rec, true));
        assert!(!drop.set_soft_drop(&mut rec, true));
        assert_eq!(rec.calls.len(), 3);
    }

    #[test]
    fn disarmed_scheduler_stays_disarmed_on_mode_change() {
        let mut rec = Recorder::default();
        let mut drop = DropScheduler::new(1000, 50);
        assert!(drop.set_soft_drop(&mut rec, true));
        assert!(rec.calls.is_empty());
        assert!(!drop.is_armed());

        drop.arm(&mut rec);
        assert_eq!(rec.calls, vec![Call::Schedule(50)]);
    }

    #[test]
    fn accept_only_takes_live_handle() {
        let mut rec = Recorder::default();
        let mut drop = DropScheduler::new(1000, 50);
        let stale = drop.arm(&mut rec);
        let live = drop.arm(&mut rec);

        assert!(!drop.accept(stale));
        assert!(drop.accept(live));
        assert!(!drop.is_armed());
        assert!(!drop.accept(live));
    }

    #[test]
    fn disarm_cancels() {
        let mut rec = Recorder::default();
        let mut drop = DropScheduler::new(1000, 50);
        assert!(!drop.disarm(&mut rec));
        drop.arm(&mut rec);
        assert!(drop.disarm(&mut rec));
        assert!(rec.live.is_empty());
    }
}
