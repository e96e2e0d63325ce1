/// Handle for one scheduled long-press. Only the handle matching the timer's
/// current generation can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u32,
    deadline_ms: u64,
}

impl TimerHandle {
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Cancellable long-press deadline.
///
/// Cancel bumps the generation, so a host timer that was already queued when
/// the session moved or ended is ignored when it finally runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LongPressTimer {
    generation: u32,
    armed: Option<TimerHandle>,
}

impl LongPressTimer {
    pub const fn new() -> Self {
        Self {
            generation: 0,
            armed: None,
        }
    }

    /// Arms a new deadline; any earlier handle is invalidated first.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> TimerHandle {
        self.cancel();
        let handle = TimerHandle {
            generation: self.generation,
            deadline_ms: now_ms.saturating_add(delay_ms),
        };
        self.armed = Some(handle);
        handle
    }

    /// Returns `true` if a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.armed.take().is_some()
    }

    /// Consumes the armed deadline if `handle` is still the live one.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.armed == Some(handle) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// Fires the armed deadline if it has passed.
    pub fn fire_due(&mut self, now_ms: u64) -> Option<TimerHandle> {
        let handle = self.armed?;
        if now_ms >= handle.deadline_ms && self.fire(handle) {
            Some(handle)
        } else {
            None
        }
    }
}
