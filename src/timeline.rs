//! Cooperative timer queue
//!
//! A single virtual clock in milliseconds. Timers are tagged with a
//! [`TimerGroup`]; cancelling a group voids all of its pending timers at
//! once, and nothing from a cancelled group is ever handed back by
//! [`Timeline::advance`]. Timers due at the same instant fire in the order
//! they were scheduled.

use std::collections::{BTreeMap, HashSet};

/// Cancellation token shared by a batch of timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerGroup(u64);

impl TimerGroup {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Timer<T> {
    group: TimerGroup,
    payload: T,
}

/// A timer whose due time has passed
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub due_ms: u64,
    pub group: TimerGroup,
    pub payload: T,
}

#[derive(Debug)]
pub struct Timeline<T> {
    now_ms: u64,
    next_seq: u64,
    next_group: u64,
    /// Keyed by (due time, schedule order)
    pending: BTreeMap<(u64, u64), Timer<T>>,
    live: HashSet<TimerGroup>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            next_group: 1,
            pending: BTreeMap::new(),
            live: HashSet::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start a new cancellation group
    pub fn open_group(&mut self) -> TimerGroup {
        let group = TimerGroup(self.next_group);
        self.next_group += 1;
        self.live.insert(group);
        group
    }

    pub fn is_live(&self, group: TimerGroup) -> bool {
        self.live.contains(&group)
    }

    /// Queue `payload` to fire `delay_ms` from now
    ///
    /// Returns false (and drops the payload) if the group was cancelled.
    pub fn schedule(&mut self, group: TimerGroup, delay_ms: u64, payload: T) -> bool {
        if !self.is_live(group) {
            return false;
        }
        let due = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((due, seq), Timer { group, payload });
        true
    }

    /// Void every pending timer in `group`; returns how many were dropped
    ///
    /// Idempotent: cancelling twice drops nothing the second time.
    pub fn cancel_group(&mut self, group: TimerGroup) -> usize {
        self.live.remove(&group);
        let before = self.pending.len();
        self.pending.retain(|_, timer| timer.group != group);
        before - self.pending.len()
    }

    /// Void every pending timer and group
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.live.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_in(&self, group: TimerGroup) -> usize {
        self.pending
            .values()
            .filter(|timer| timer.group == group)
            .count()
    }

    /// Due time of the earliest pending timer
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Move the clock forward and collect everything now due, in order
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Fired<T>> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (due, _) = *entry.key();
            if due > self.now_ms {
                break;
            }
            let timer = entry.remove();
            if self.live.contains(&timer.group) {
                fired.push(Fired {
                    due_ms: due,
                    group: timer.group,
                    payload: timer.payload,
                });
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timeline = Timeline::new();
        let group = timeline.open_group();
        timeline.schedule(group, 5, "late");
        timeline.schedule(group, 0, "now");
        timeline.schedule(group, 5, "late-second");

        assert_eq!(timeline.next_due_ms(), Some(0));
        let fired: Vec<_> = timeline.advance(0).into_iter().map(|f| f.payload).collect();
        assert_eq!(fired, vec!["now"]);

        assert!(timeline.advance(4).is_empty());
        let fired: Vec<_> = timeline.advance(1).into_iter().map(|f| f.payload).collect();
        assert_eq!(fired, vec!["late", "late-second"]);
        assert_eq!(timeline.pending(), 0);
    }

    #[test]
    fn test_cancel_group_voids_only_that_group() {
        let mut timeline = Timeline::new();
        let a = timeline.open_group();
        let b = timeline.open_group();
        for delay in 0..3 {
            timeline.schedule(a, delay, 'a');
            timeline.schedule(b, delay, 'b');
        }

        assert_eq!(timeline.cancel_group(a), 3);
        assert_eq!(timeline.cancel_group(a), 0);
        assert!(!timeline.is_live(a));
        assert!(!timeline.schedule(a, 1, 'a'));

        let fired = timeline.advance(10);
        assert_eq!(fired.len(), 3);
        assert!(fired.iter().all(|f| f.payload == 'b' && f.group == b));
    }

    #[test]
    fn test_cancel_all() {
        let mut timeline = Timeline::new();
        let a = timeline.open_group();
        timeline.schedule(a, 1, ());
        timeline.schedule(a, 2, ());
        assert_eq!(timeline.pending_in(a), 2);
        assert_eq!(timeline.cancel_all(), 2);
        assert!(timeline.advance(100).is_empty());
        assert_eq!(timeline.now_ms(), 100);
    }
}
