use std::time::{Duration, Instant};

/// A value whose updates are coalesced and published after a delay.
///
/// The deadline is armed by the first update after a publish and is not pushed back by later
/// updates, so a published value is never older than `delay` once input goes idle, and continuous
/// input still publishes at least once per `delay`. A zero delay publishes immediately.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    current: T,
    pending: Option<T>,
    deadline: Option<Instant>,
    delay: Duration,
}

impl<T: PartialEq> Deferred<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            current: initial,
            pending: None,
            deadline: None,
            delay,
        }
    }

    /// The published value.
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Queues `value`. Returns `true` when the published value changed right away (zero delay).
    pub fn set(&mut self, value: T, now: Instant) -> bool {
        if self.delay.is_zero() {
            self.pending = None;
            self.deadline = None;
            return self.publish(value);
        }
        self.pending = Some(value);
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
        }
        false
    }

    /// Publishes `value` immediately and drops anything pending.
    pub fn reset(&mut self, value: T) {
        self.pending = None;
        self.deadline = None;
        self.current = value;
    }

    /// Publishes the pending value if its deadline has passed. Returns `true` when the published
    /// value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot > self.delay {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "deferred value published late"
            );
        }

        self.deadline = None;
        match self.pending.take() {
            Some(value) => self.publish(value),
            None => false,
        }
    }

    fn publish(&mut self, value: T) -> bool {
        if value == self.current {
            return false;
        }
        self.current = value;
        true
    }
}
