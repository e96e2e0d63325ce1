use log::{debug, info};
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::config::ConfigError;

use super::{
    config::GestureConfig,
    long_press::{LongPressTimer, TimerHandle},
    types::{GestureEvent, SwipeDirection, TouchSample},
};

/// The single in-flight interaction. Only `origin` and the final sample take
/// part in classification; moves only matter for jitter cancellation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub origin: TouchSample,
    pub last_sample: TouchSample,
    pub pending_long_press: Option<TimerHandle>,
}

#[derive(Clone, Copy, Debug)]
enum ClassifierEvent {
    Start(TouchSample),
    Move(TouchSample),
    End(TouchSample),
    TimerFired(TimerHandle),
    Tick(u64),
    Cancel,
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    emitted: Option<GestureEvent>,
}

impl DispatchContext {
    fn emit(&mut self, event: GestureEvent) {
        debug_assert!(self.emitted.is_none(), "one gesture per dispatch");
        info!("gesture: emit kind={}", event.label());
        self.emitted = Some(event);
    }
}

/// Classifies one touch session at a time into tap, long press or swipe.
///
/// Time only advances through sample timestamps and explicit timer fires, so
/// the same classifier runs under a real timer service
/// ([`super::tasks::run_gesture_pipeline`]) or a polling loop ([`Self::poll`]).
pub struct GestureClassifier {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::with_valid_config(GestureConfig::default())
    }
}

impl GestureClassifier {
    /// Rejects thresholds that are zero, negative or not finite.
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: GestureConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.machine.inner().config
    }

    /// Opens a session, silently dropping any open one. The host schedules
    /// its timer from [`Self::pending_long_press`].
    pub fn on_touch_start(&mut self, sample: TouchSample) {
        self.dispatch(ClassifierEvent::Start(sample));
    }

    pub fn on_touch_move(&mut self, sample: TouchSample) {
        self.dispatch(ClassifierEvent::Move(sample));
    }

    pub fn on_touch_end(&mut self, sample: TouchSample) -> Option<GestureEvent> {
        self.dispatch(ClassifierEvent::End(sample)).emitted
    }

    /// Host timer callback. Stale handles (session moved, ended, or replaced)
    /// are ignored.
    pub fn on_long_press_timer(&mut self, handle: TimerHandle) -> Option<GestureEvent> {
        self.dispatch(ClassifierEvent::TimerFired(handle)).emitted
    }

    /// Fires the long-press if its deadline is at or before `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        self.dispatch(ClassifierEvent::Tick(now_ms)).emitted
    }

    /// Host `touchcancel`: drops the session without emitting.
    pub fn on_touch_cancel(&mut self) {
        self.dispatch(ClassifierEvent::Cancel);
    }

    /// Host surface is going away. Cancels the long-press synchronously and
    /// drops the session; safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.machine.inner().session.is_some() {
            debug!("gesture: teardown with open session");
        }
        self.dispatch(ClassifierEvent::Cancel);
    }

    pub fn is_pressed(&self) -> bool {
        self.machine.inner().pressed
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.machine.inner().session.as_ref()
    }

    pub fn pending_long_press(&self) -> Option<TimerHandle> {
        self.machine
            .inner()
            .session
            .and_then(|session| session.pending_long_press)
    }

    fn dispatch(&mut self, event: ClassifierEvent) -> DispatchContext {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context
    }
}

struct GestureHsm {
    config: GestureConfig,
    timer: LongPressTimer,
    session: Option<GestureSession>,
    pressed: bool,
}

impl GestureHsm {
    fn new(config: GestureConfig) -> Self {
        Self {
            config,
            timer: LongPressTimer::new(),
            session: None,
            pressed: false,
        }
    }

    fn begin_session(&mut self, sample: TouchSample) {
        if self.session.is_some() {
            debug!("gesture: session_replaced");
            self.end_session();
        }
        let handle = self
            .timer
            .schedule(sample.t_ms, self.config.long_press_delay_ms);
        self.session = Some(GestureSession {
            origin: sample,
            last_sample: sample,
            pending_long_press: Some(handle),
        });
        self.pressed = true;
        debug!(
            "gesture: session_start x={} y={} t_ms={} long_press_at={}",
            sample.x,
            sample.y,
            sample.t_ms,
            handle.deadline_ms()
        );
    }

    fn cancel_long_press(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pending_long_press = None;
        }
        if self.timer.cancel() {
            debug!("gesture: long_press_cancelled");
        }
    }

    fn end_session(&mut self) {
        self.cancel_long_press();
        self.session = None;
        self.pressed = false;
    }

    /// Updates the last sample and reports whether the finger left the
    /// jitter radius around the origin.
    fn track_move(&mut self, sample: TouchSample) -> bool {
        let jitter = self.config.jitter_threshold_px;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.last_sample = sample;
        session.origin.distance_to(&sample) > jitter
    }

    fn finish(&mut self, context: &mut DispatchContext, sample: TouchSample) {
        // Timer goes first so nothing queued behind this release can fire.
        self.cancel_long_press();
        let Some(session) = self.session else {
            return;
        };
        if let Some(event) = self.classify(&session.origin, &sample) {
            context.emit(event);
        } else {
            debug!(
                "gesture: inconclusive distance={} duration_ms={}",
                session.origin.distance_to(&sample),
                sample.elapsed_since(&session.origin)
            );
        }
        self.end_session();
    }

    fn classify(&self, origin: &TouchSample, end: &TouchSample) -> Option<GestureEvent> {
        let distance = origin.distance_to(end);
        let duration_ms = end.elapsed_since(origin);

        if distance < self.config.jitter_threshold_px && duration_ms < self.config.tap_timeout_ms
        {
            return Some(GestureEvent::Tap { point: *end });
        }

        if distance > self.config.swipe_threshold_px {
            let velocity = distance / duration_ms.max(1) as f32;
            let direction = SwipeDirection::from_delta(end.x - origin.x, end.y - origin.y);
            return Some(GestureEvent::Swipe {
                direction,
                distance,
                velocity,
                duration_ms,
            });
        }

        None
    }

    fn owns_long_press(&self, handle: TimerHandle) -> bool {
        self.session
            .is_some_and(|session| session.pending_long_press == Some(handle))
    }

    fn fire_long_press(&mut self, context: &mut DispatchContext, handle: TimerHandle) -> bool {
        if !self.owns_long_press(handle) || !self.timer.fire(handle) {
            debug!("gesture: stale_timer generation={}", handle.generation());
            return false;
        }
        self.emit_long_press(context)
    }

    fn fire_due_long_press(&mut self, context: &mut DispatchContext, now_ms: u64) -> bool {
        match self.timer.fire_due(now_ms) {
            Some(handle) if self.owns_long_press(handle) => self.emit_long_press(context),
            Some(handle) => {
                debug!("gesture: stale_timer generation={}", handle.generation());
                false
            }
            None => false,
        }
    }

    fn emit_long_press(&mut self, context: &mut DispatchContext) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        context.emit(GestureEvent::LongPress {
            point: session.origin,
        });
        self.end_session();
        true
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &ClassifierEvent) -> Outcome<State> {
        let _ = context;
        match event {
            ClassifierEvent::Start(sample) => {
                self.begin_session(*sample);
                Transition(State::pressed())
            }
            // Moves, ends and timers without a session are host ordering noise.
            _ => Handled,
        }
    }

    #[state]
    fn pressed(
        &mut self,
        context: &mut DispatchContext,
        event: &ClassifierEvent,
    ) -> Outcome<State> {
        match event {
            ClassifierEvent::Start(sample) => {
                self.begin_session(*sample);
                Transition(State::pressed())
            }
            ClassifierEvent::Move(sample) => {
                if self.track_move(*sample) {
                    self.cancel_long_press();
                    Transition(State::dragging())
                } else {
                    Handled
                }
            }
            ClassifierEvent::End(sample) => {
                self.finish(context, *sample);
                Transition(State::idle())
            }
            ClassifierEvent::TimerFired(handle) => {
                if self.fire_long_press(context, *handle) {
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            ClassifierEvent::Tick(now_ms) => {
                if self.fire_due_long_press(context, *now_ms) {
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            ClassifierEvent::Cancel => {
                self.end_session();
                Transition(State::idle())
            }
        }
    }

    #[state]
    fn dragging(
        &mut self,
        context: &mut DispatchContext,
        event: &ClassifierEvent,
    ) -> Outcome<State> {
        match event {
            ClassifierEvent::Start(sample) => {
                self.begin_session(*sample);
                Transition(State::pressed())
            }
            ClassifierEvent::Move(sample) => {
                self.track_move(*sample);
                Handled
            }
            ClassifierEvent::End(sample) => {
                self.finish(context, *sample);
                Transition(State::idle())
            }
            ClassifierEvent::TimerFired(handle) => {
                debug!("gesture: stale_timer generation={}", handle.generation());
                Handled
            }
            ClassifierEvent::Tick(_) => Handled,
            ClassifierEvent::Cancel => {
                self.end_session();
                Transition(State::idle())
            }
        }
    }
}
