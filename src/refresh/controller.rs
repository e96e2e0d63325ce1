use log::{debug, info};
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::config::PullConfig;
use crate::{config::ConfigError, touch::TouchSample};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PullPhase {
    #[default]
    Idle,
    Pulling,
    Refreshing,
}

/// Snapshot for the rendering layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PullState {
    pub is_pulling: bool,
    pub pull_distance: f32,
    pub is_refreshing: bool,
    /// `min(pull_distance / threshold, 1)`.
    pub pull_progress: f32,
}

/// Result of a move. The engine never touches the surface itself; the host
/// suppresses native overscroll when `prevent_default` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PullMove {
    pub prevent_default: bool,
    pub pull_distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullRelease {
    /// Threshold reached: the caller runs the refresh and then reports back
    /// through [`PullToRefreshController::finish_refresh`].
    Refresh,
    /// Released short of the threshold; state went straight back to idle.
    Reset,
    /// No pull session, or a refresh is already in flight.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PullSession {
    /// Only set when the touch began with the surface at scroll origin.
    start_y: Option<f32>,
    pull_distance: f32,
    phase: PullPhase,
}

#[derive(Clone, Copy, Debug)]
enum PullEvent {
    Start { sample: TouchSample, scroll_top: f32 },
    Move { sample: TouchSample, scroll_top: f32 },
    End,
    Settled,
    Teardown,
}

#[derive(Clone, Copy, Debug)]
struct DispatchContext {
    movement: PullMove,
    release: PullRelease,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            movement: PullMove::default(),
            release: PullRelease::Ignored,
        }
    }
}

/// Pull-to-refresh session tracking.
///
/// `Idle -> Pulling` on the first downward move, `Pulling -> Refreshing` on a
/// release at or past the threshold, `Refreshing -> Idle` once the refresh
/// settles. A short release goes `Pulling -> Idle` directly.
pub struct PullToRefreshController {
    machine: statig::blocking::StateMachine<PullHsm>,
}

impl Default for PullToRefreshController {
    fn default() -> Self {
        Self::with_valid_config(PullConfig::default())
    }
}

impl PullToRefreshController {
    /// Rejects configs whose pull cap would sit below zero or below the
    /// threshold.
    pub fn new(config: PullConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PullConfig) -> Self {
        Self {
            machine: PullHsm::new(config).state_machine(),
        }
    }

    pub fn config(&self) -> &PullConfig {
        &self.machine.inner().config
    }

    pub fn on_touch_start(&mut self, sample: TouchSample, scroll_top: f32) {
        self.dispatch(PullEvent::Start { sample, scroll_top });
    }

    pub fn on_touch_move(&mut self, sample: TouchSample, scroll_top: f32) -> PullMove {
        self.dispatch(PullEvent::Move { sample, scroll_top }).movement
    }

    pub fn on_touch_end(&mut self) -> PullRelease {
        self.dispatch(PullEvent::End).release
    }

    /// Refresh settled, successfully or not.
    pub fn finish_refresh(&mut self) {
        self.dispatch(PullEvent::Settled);
    }

    /// Drops a pull in progress. A refresh already in flight still settles
    /// through [`Self::finish_refresh`].
    pub fn teardown(&mut self) {
        self.dispatch(PullEvent::Teardown);
    }

    pub fn phase(&self) -> PullPhase {
        self.machine.inner().session.phase
    }

    pub fn pull_distance(&self) -> f32 {
        self.machine.inner().session.pull_distance
    }

    pub fn pull_progress(&self) -> f32 {
        self.machine.inner().progress()
    }

    pub fn state(&self) -> PullState {
        let hsm = self.machine.inner();
        PullState {
            is_pulling: hsm.session.phase == PullPhase::Pulling,
            pull_distance: hsm.session.pull_distance,
            is_refreshing: hsm.session.phase == PullPhase::Refreshing,
            pull_progress: hsm.progress(),
        }
    }

    fn dispatch(&mut self, event: PullEvent) -> DispatchContext {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context
    }
}

struct PullHsm {
    config: PullConfig,
    session: PullSession,
}

impl PullHsm {
    fn new(config: PullConfig) -> Self {
        Self {
            config,
            session: PullSession {
                start_y: None,
                pull_distance: 0.0,
                phase: PullPhase::Idle,
            },
        }
    }

    fn progress(&self) -> f32 {
        (self.session.pull_distance / self.config.threshold_px).min(1.0)
    }

    fn record_start(&mut self, sample: TouchSample, scroll_top: f32) {
        if scroll_top <= 0.0 {
            self.session.start_y = Some(sample.y);
            debug!("pull: track start_y={}", sample.y);
        } else {
            self.session.start_y = None;
            debug!("pull: skip scroll_top={}", scroll_top);
        }
    }

    /// Travel since the tracked start; `None` when the move does not belong
    /// to a pull (content scrolled or the touch began mid-content).
    fn pull_delta(&self, sample: TouchSample, scroll_top: f32) -> Option<f32> {
        if scroll_top > 0.0 {
            return None;
        }
        self.session.start_y.map(|start_y| sample.y - start_y)
    }

    /// `delta` is positive here.
    fn apply_delta(&mut self, context: &mut DispatchContext, delta: f32) {
        self.session.pull_distance = delta.min(self.config.max_pull_px());
        context.movement = PullMove {
            prevent_default: delta > self.config.prevent_scroll_px,
            pull_distance: self.session.pull_distance,
        };
    }

    fn reset(&mut self) {
        self.session.start_y = None;
        self.session.pull_distance = 0.0;
        self.session.phase = PullPhase::Idle;
    }
}

#[state_machine(initial = "State::idle()")]
impl PullHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &PullEvent) -> Outcome<State> {
        match event {
            PullEvent::Start { sample, scroll_top } => {
                self.record_start(*sample, *scroll_top);
                Handled
            }
            PullEvent::Move { sample, scroll_top } => match self.pull_delta(*sample, *scroll_top) {
                Some(delta) if delta > 0.0 => {
                    self.session.phase = PullPhase::Pulling;
                    self.apply_delta(context, delta);
                    debug!("pull: pulling delta={}", delta);
                    Transition(State::pulling())
                }
                _ => Handled,
            },
            PullEvent::End => {
                if self.session.start_y.is_some() {
                    context.release = PullRelease::Reset;
                }
                self.reset();
                Handled
            }
            PullEvent::Settled => Handled,
            PullEvent::Teardown => {
                self.reset();
                Handled
            }
        }
    }

    #[state]
    fn pulling(&mut self, context: &mut DispatchContext, event: &PullEvent) -> Outcome<State> {
        match event {
            // A start without an end means the host lost a release; the old
            // pull cannot be trusted.
            PullEvent::Start { sample, scroll_top } => {
                self.reset();
                self.record_start(*sample, *scroll_top);
                Transition(State::idle())
            }
            // Dragging back above the start keeps the last downward distance.
            PullEvent::Move { sample, scroll_top } => {
                match self.pull_delta(*sample, *scroll_top) {
                    Some(delta) if delta > 0.0 => self.apply_delta(context, delta),
                    _ => context.movement.pull_distance = self.session.pull_distance,
                }
                Handled
            }
            PullEvent::End => {
                if self.session.pull_distance >= self.config.threshold_px {
                    self.session.start_y = None;
                    self.session.phase = PullPhase::Refreshing;
                    context.release = PullRelease::Refresh;
                    info!(
                        "pull: refresh_requested distance={}",
                        self.session.pull_distance
                    );
                    Transition(State::refreshing())
                } else {
                    debug!(
                        "pull: below_threshold distance={}",
                        self.session.pull_distance
                    );
                    context.release = PullRelease::Reset;
                    self.reset();
                    Transition(State::idle())
                }
            }
            PullEvent::Settled => Handled,
            PullEvent::Teardown => {
                self.reset();
                Transition(State::idle())
            }
        }
    }

    #[state]
    fn refreshing(&mut self, context: &mut DispatchContext, event: &PullEvent) -> Outcome<State> {
        let _ = context;
        match event {
            PullEvent::Start { sample, scroll_top } => {
                self.record_start(*sample, *scroll_top);
                Handled
            }
            PullEvent::Move { .. } => Handled,
            PullEvent::End | PullEvent::Teardown => {
                self.session.start_y = None;
                Handled
            }
            PullEvent::Settled => {
                // Keep a start tracked during the refresh so a finger that is
                // still down can begin the next pull.
                self.session.pull_distance = 0.0;
                self.session.phase = PullPhase::Idle;
                info!("pull: refresh_settled");
                Transition(State::idle())
            }
        }
    }
}

#[cfg(test)]
mod tests;
