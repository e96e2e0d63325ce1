use std::{cell::Cell, convert::Infallible, future::Future};

use anyhow::Result;
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use log::debug;
use tactile::{
    GestureClassifier, GestureConfig, GestureEvent, HostSurface, PullConfig, PullToRefresh,
    RefreshCallback, RefreshOutcome, TouchSample,
};

use crate::trace::{TracePhase, TraceSample};

/// Something either machine reported during replay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayEvent {
    pub ms: u64,
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub samples: usize,
    pub prevented_moves: u32,
    pub refreshes: u32,
}

#[derive(Debug, Default)]
pub struct ReplayOutput {
    pub events: Vec<ReplayEvent>,
    pub stats: ReplayStats,
}

impl ReplayOutput {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.iter().map(|event| event.kind).collect()
    }
}

#[derive(Default)]
struct TraceSurface {
    scroll_top: Cell<f32>,
    prevented: Cell<u32>,
}

impl HostSurface for TraceSurface {
    fn scroll_offset_top(&self) -> f32 {
        self.scroll_top.get()
    }

    fn prevent_default_scroll(&self) {
        self.prevented.set(self.prevented.get() + 1);
    }
}

#[derive(Default)]
struct RecordedRefresh {
    calls: u32,
}

impl RefreshCallback for RecordedRefresh {
    type Error = Infallible;

    fn refresh(&mut self) -> impl Future<Output = Result<(), Self::Error>> {
        self.calls += 1;
        async { Ok(()) }
    }
}

/// Feeds a trace through a gesture classifier and a pull-to-refresh binding
/// side by side, the way a host surface would.
pub fn replay(
    samples: &[TraceSample],
    gesture: GestureConfig,
    pull: PullConfig,
) -> Result<ReplayOutput> {
    let mut classifier = GestureClassifier::new(gesture)?;
    let binding: PullToRefresh<NoopRawMutex, TraceSurface> =
        PullToRefresh::new(pull, TraceSurface::default())?;
    let mut refresh = RecordedRefresh::default();
    let mut events = Vec::new();

    for trace in samples {
        fire_long_press(&mut classifier, trace.ms, &mut events);

        let sample = TouchSample::new(trace.x, trace.y, trace.ms);
        binding.surface().scroll_top.set(trace.scroll_top);
        match trace.phase {
            TracePhase::Start => {
                classifier.on_touch_start(sample);
                binding.touch_start(sample);
            }
            TracePhase::Move => {
                classifier.on_touch_move(sample);
                binding.touch_move(sample);
            }
            TracePhase::End => {
                if let Some(event) = classifier.on_touch_end(sample) {
                    events.push(gesture_event(sample, event));
                }
                let outcome = match block_on(binding.touch_end(&mut refresh)) {
                    Ok(outcome) => outcome,
                    Err(never) => match never {},
                };
                debug!("replay: release ms={} outcome={:?}", trace.ms, outcome);
                if outcome == RefreshOutcome::Refreshed {
                    events.push(ReplayEvent {
                        ms: trace.ms,
                        kind: "refresh",
                        x: trace.x,
                        y: trace.y,
                    });
                }
            }
            TracePhase::Cancel => {
                classifier.on_touch_cancel();
                binding.teardown();
            }
        }
    }

    // A trace that stops while the finger is still down would otherwise never
    // reach the long-press deadline.
    fire_long_press(&mut classifier, u64::MAX, &mut events);
    classifier.teardown();
    binding.teardown();

    Ok(ReplayOutput {
        events,
        stats: ReplayStats {
            samples: samples.len(),
            prevented_moves: binding.surface().prevented.get(),
            refreshes: refresh.calls,
        },
    })
}

/// Stands in for the host timer: fires a long press whose deadline is at
/// or before `now_ms`, stamped with the deadline itself.
fn fire_long_press(classifier: &mut GestureClassifier, now_ms: u64, events: &mut Vec<ReplayEvent>) {
    let Some(handle) = classifier.pending_long_press() else {
        return;
    };
    if let Some(event) = classifier.poll(now_ms) {
        let at = TouchSample::new(0.0, 0.0, handle.deadline_ms());
        events.push(gesture_event(at, event));
    }
}

/// Taps and long presses carry their own point; swipes are reported at the
/// release sample.
fn gesture_event(at: TouchSample, event: GestureEvent) -> ReplayEvent {
    let point = match event {
        GestureEvent::Tap { point } | GestureEvent::LongPress { point } => point,
        GestureEvent::Swipe { .. } => at,
    };
    ReplayEvent {
        ms: at.t_ms,
        kind: event.label(),
        x: point.x,
        y: point.y,
    }
}
