use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Cooperative cancellation as seen by a running search.
pub trait Cancellable: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

pub struct NeverCancelled;

impl Cancellable for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Flag that can be raised from another thread while a search is running.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

impl Cancellable for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Cancelled once the deadline has passed.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Deadline { at }
    }

    pub fn after(timeout: Duration) -> Self {
        Deadline {
            at: Instant::now() + timeout,
        }
    }
}

impl Cancellable for Deadline {
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// Asks the wrapped cancellable only on every `period`-th call, starting with
/// the first one.
pub(crate) struct PeriodicPoll<'a> {
    cancellable: &'a dyn Cancellable,
    period: u32,
    count: u32,
}

impl<'a> PeriodicPoll<'a> {
    pub(crate) fn new(cancellable: &'a dyn Cancellable, period: u32) -> Self {
        PeriodicPoll {
            cancellable,
            period: period.max(1),
            count: 0,
        }
    }

    pub(crate) fn is_cancelled(&mut self) -> bool {
        let poll = self.count == 0;
        self.count = (self.count + 1) % self.period;
        poll && self.cancellable.is_cancelled()
    }
}
