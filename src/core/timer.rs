//! Debounce and throttle primitives.
//!
//! Neither type owns a thread or a runtime timer. Each holds at most one
//! pending deadline and is polled with the current time; scheduling always
//! replaces the previous deadline, so timers never accumulate.

use super::types::Millis;

/// Fires once after `delay_ms` of quiet following the last `schedule`.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay_ms: Millis,
    deadline: Option<Millis>,
}

impl Debounce {
    pub fn new(delay_ms: Millis) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// (Re)start the timer, dropping any earlier deadline
    pub fn schedule(&mut self, now: Millis) {
        self.deadline = Some(now.saturating_add(self.delay_ms));
    }

    /// Cancel the pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Consume the deadline if it has passed
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Rate-limits a stream of values: at most one delivery per `delay_ms`,
/// and the latest offered value always wins.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    delay_ms: Millis,
    deadline: Option<Millis>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(delay_ms: Millis) -> Self {
        Self {
            delay_ms,
            deadline: None,
            pending: None,
        }
    }

    /// Offer a value. Starts the window if none is running; otherwise the
    /// value replaces whatever was pending.
    pub fn offer(&mut self, value: T, now: Millis) {
        self.pending = Some(value);
        if self.deadline.is_none() {
            self.deadline = Some(now.saturating_add(self.delay_ms));
        }
    }

    /// Value waiting for delivery, if any
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    /// Deliver the pending value once its window has elapsed
    pub fn fire(&mut self, now: Millis) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}
