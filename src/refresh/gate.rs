use core::{
    future::Future,
    sync::atomic::{AtomicBool, Ordering},
};

use log::warn;

/// Outcome of [`RefreshGate::run`] when the callback did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation<T> {
    Completed(T),
    /// Another refresh was in flight; nothing ran.
    Dropped,
}

/// Single-flight guard: at most one refresh in flight, overlapping requests
/// are dropped rather than queued.
#[derive(Debug, Default)]
pub struct RefreshGate {
    in_flight: AtomicBool,
}

/// Held while a refresh runs; releases the gate on drop, including when the
/// refresh future is cancelled.
#[must_use]
#[derive(Debug)]
pub struct RefreshPermit<'a> {
    gate: &'a RefreshGate,
}

impl Drop for RefreshPermit<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}

impl RefreshGate {
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Option<RefreshPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshPermit { gate: self })
    }

    /// Runs `refresh` unless one is already in flight. The callback error is
    /// handed back untouched; the gate is open again either way.
    pub async fn run<F, Fut, T, E>(&self, refresh: F) -> Result<Invocation<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(_permit) = self.try_acquire() else {
            warn!("refresh: dropped reason=in_flight");
            return Ok(Invocation::Dropped);
        };
        refresh().await.map(Invocation::Completed)
    }
}
