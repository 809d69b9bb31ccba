#![forbid(unsafe_code)]

//! Completion clock for hosts without a native transition-end signal.
//!
//! Browsers report the end of a CSS transition; terminals and tests do not.
//! [`TransitionClock`] fills the gap: schedule a tag with a duration when a
//! transition starts, then call [`tick`](TransitionClock::tick) from the host
//! loop to receive the tags whose transitions have finished.
//!
//! # Invariants
//!
//! 1. Every scheduled tag is released at most once.
//! 2. Tags due at the same tick are released in deadline order, ties in
//!    scheduling order.
//! 3. A zero duration is released on the first tick at or after scheduling.

use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Instant,
    seq: u64,
    tag: T,
}

/// Deadline queue of transition completion tags.
#[derive(Debug, Clone)]
pub struct TransitionClock<T> {
    pending: Vec<Pending<T>>,
    next_seq: u64,
}

impl<T> Default for TransitionClock<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> TransitionClock<T> {
    /// Create an empty clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tag` to complete `duration` after `now`.
    pub fn schedule(&mut self, tag: T, now: Instant, duration: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: now + duration,
            seq,
            tag,
        });
    }

    /// Release every tag due at or before `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.tag).collect()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Number of tags not yet released.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending tag without releasing it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_300: Duration = Duration::from_millis(300);

    #[test]
    fn releases_after_deadline() {
        let t = Instant::now();
        let mut clock = TransitionClock::new();
        clock.schedule(1u64, t, MS_300);

        assert!(clock.tick(t + MS_100).is_empty());
        assert_eq!(clock.tick(t + MS_300), vec![1]);
        assert!(clock.is_idle());
    }

    #[test]
    fn releases_once() {
        let t = Instant::now();
        let mut clock = TransitionClock::new();
        clock.schedule("a", t, MS_100);
        assert_eq!(clock.tick(t + MS_300), vec!["a"]);
        assert!(clock.tick(t + MS_300).is_empty());
    }

    #[test]
    fn deadline_order_then_schedule_order() {
        let t = Instant::now();
        let mut clock = TransitionClock::new();
        clock.schedule(3, t, MS_300);
        clock.schedule(1, t, MS_100);
        clock.schedule(2, t, MS_100);
        assert_eq!(clock.next_deadline(), Some(t + MS_100));
        assert_eq!(clock.tick(t + MS_300), vec![1, 2, 3]);
    }

    #[test]
    fn zero_duration_due_immediately() {
        let t = Instant::now();
        let mut clock = TransitionClock::new();
        clock.schedule(9, t, Duration::ZERO);
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.tick(t), vec![9]);
    }

    #[test]
    fn clear_drops_pending() {
        let t = Instant::now();
        let mut clock = TransitionClock::new();
        clock.schedule(1, t, MS_100);
        clock.clear();
        assert!(clock.tick(t + MS_300).is_empty());
        assert_eq!(clock.next_deadline(), None);
    }
}
