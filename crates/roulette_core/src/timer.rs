//! # Timer Queue
//!
//! The controller never sleeps and never reads a clock. It asks a
//! [`Scheduler`] for one-shot and repeating timers and reacts when the
//! owner of the scheduler hands a fired [`TimerKind`] back.
//!
//! [`TimerQueue`] is the only scheduler in the crate. It keeps its own
//! virtual "now", so tests can advance time by exact amounts and real-time
//! drivers can map elapsed wall time onto the same timeline.
//!
//! ## Ordering
//!
//! Timers fire in deadline order. Timers sharing a deadline fire in the
//! order they were armed. A cancelled timer never fires, even if its
//! deadline has already passed when `cancel` is called.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Smallest repeating interval accepted. Shorter intervals are raised to it.
pub const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// What a timer is for. The controller dispatches on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Repeating: show a random preview face while spinning.
    PreviewTick,
    /// One-shot: the spin animation is over, commit the result.
    Complete,
    /// One-shot: result display is over, accept a new spin.
    Settle,
    /// One-shot: take the bonus banner down.
    HideBonus,
}

/// Handle to an armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    /// Timer handle.
    pub id: TimerId,
    /// What the timer is for.
    pub kind: TimerKind,
    /// Virtual time at which it fired.
    pub at: Duration,
}

/// Timer service consumed by the controller.
pub trait Scheduler {
    /// Arms a timer that fires once after `delay`.
    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId;

    /// Arms a timer that fires every `interval`, first after one interval.
    fn schedule_repeating(&mut self, interval: Duration, kind: TimerKind) -> TimerId;

    /// Disarms a timer. Unknown or already-fired one-shot ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Clone, Copy, Debug)]
struct Armed {
    kind: TimerKind,
    interval: Option<Duration>,
}

/// Heap key: deadline first, then arming order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Slot {
    deadline: Duration,
    seq: u64,
    id: TimerId,
}

/// Virtual-time timer queue.
#[derive(Debug, Default)]
pub struct TimerQueue {
    /// Current virtual time.
    now: Duration,
    /// Pending deadlines. May hold slots for cancelled timers.
    heap: BinaryHeap<Reverse<Slot>>,
    /// Live timers by id.
    armed: HashMap<TimerId, Armed>,
    /// Next timer id.
    next_id: u64,
    /// Next arming sequence number.
    next_seq: u64,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.armed.len()
    }

    /// True if a live timer of `kind` exists.
    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.values().any(|a| a.kind == kind)
    }

    /// Deadline of the earliest live timer.
    #[must_use]
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.heap.peek().map(|Reverse(slot)| slot.deadline)
    }

    /// Pops the earliest timer due at or before `until`.
    ///
    /// Moves virtual time forward to the fired deadline, so anything the
    /// caller arms in response is measured from that instant. Repeating
    /// timers are re-armed one interval after their deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<FiredTimer> {
        self.discard_cancelled();
        let Reverse(slot) = *self.heap.peek()?;
        if slot.deadline > until {
            return None;
        }
        self.heap.pop();

        let armed = *self.armed.get(&slot.id)?;
        self.now = self.now.max(slot.deadline);

        match armed.interval {
            Some(interval) => self.push(slot.id, slot.deadline + interval),
            None => {
                self.armed.remove(&slot.id);
            }
        }

        Some(FiredTimer {
            id: slot.id,
            kind: armed.kind,
            at: slot.deadline,
        })
    }

    /// Moves virtual time forward without firing anything.
    ///
    /// Time never goes backwards; earlier instants are ignored.
    pub fn advance_to(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    fn arm(&mut self, delay: Duration, kind: TimerKind, interval: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed.insert(id, Armed { kind, interval });
        self.push(id, self.now + delay);
        id
    }

    fn push(&mut self, id: TimerId, deadline: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Slot { deadline, seq, id }));
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse(slot)) = self.heap.peek() {
            if self.armed.contains_key(&slot.id) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.arm(delay, kind, None)
    }

    fn schedule_repeating(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let interval = interval.max(MIN_REPEAT_INTERVAL);
        self.arm(interval, kind, Some(interval))
    }

    fn cancel(&mut self, id: TimerId) {
        self.armed.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(queue: &mut TimerQueue, until: Duration) -> Vec<(TimerKind, u64)> {
        let mut fired = Vec::new();
        while let Some(t) = queue.pop_due(until) {
            fired.push((t.kind, t.at.as_millis() as u64));
        }
        queue.advance_to(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(ms(30), TimerKind::Settle);
        queue.schedule_once(ms(10), TimerKind::Complete);
        queue.schedule_once(ms(20), TimerKind::HideBonus);

        let fired = drain(&mut queue, ms(100));
        assert_eq!(
            fired,
            vec![
                (TimerKind::Complete, 10),
                (TimerKind::HideBonus, 20),
                (TimerKind::Settle, 30),
            ]
        );
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.now(), ms(100));
    }

    #[test]
    fn test_ties_fire_in_arming_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(ms(50), TimerKind::Settle);
        queue.schedule_once(ms(50), TimerKind::Complete);

        let fired = drain(&mut queue, ms(50));
        assert_eq!(fired, vec![(TimerKind::Settle, 50), (TimerKind::Complete, 50)]);
    }

    #[test]
    fn test_repeating_rearms_until_cancelled() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(ms(80), TimerKind::PreviewTick);

        assert_eq!(drain(&mut queue, ms(250)).len(), 3);
        assert_eq!(queue.next_deadline(), Some(ms(320)));

        queue.cancel(id);
        assert!(drain(&mut queue, ms(1000)).is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn test_cancelled_timer_never_fires_even_when_overdue() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_once(ms(10), TimerKind::Complete);
        queue.advance_to(ms(500));
        queue.cancel(id);
        assert!(queue.pop_due(ms(500)).is_none());
    }

    #[test]
    fn test_delays_are_relative_to_fire_time() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(ms(100), TimerKind::Complete);
        let fired = queue.pop_due(ms(1000)).unwrap();
        assert_eq!(queue.now(), ms(100));

        queue.schedule_once(ms(40), TimerKind::Settle);
        assert_eq!(queue.next_deadline(), Some(fired.at + ms(40)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(Duration::ZERO, TimerKind::PreviewTick);
        assert_eq!(drain(&mut queue, ms(5)).len(), 5);
    }
}
