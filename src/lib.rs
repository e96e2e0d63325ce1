//! Touch interaction engine.
//!
//! Two independent state machines consume the same touch lifecycle
//! (start, zero or more moves, end):
//!
//! * [`touch::GestureClassifier`] turns a session into at most one
//!   [`touch::GestureEvent`] (tap, long press or swipe).
//! * [`refresh::PullToRefreshController`] turns a downward drag started at
//!   scroll origin into pull progress and a single refresh request.
//!
//! Neither machine owns a clock or a UI. Timestamps arrive with each
//! [`touch::TouchSample`]; the async glue in [`touch::tasks`] and
//! [`refresh::PullToRefresh`] wires them to embassy timers and channels.

pub mod config;
pub mod refresh;
pub mod touch;

pub use config::ConfigError;
pub use refresh::{
    HostSurface, Invocation, PullConfig, PullMove, PullPhase, PullRelease, PullState,
    PullToRefresh, PullToRefreshController, RefreshCallback, RefreshGate, RefreshOutcome,
};
pub use touch::{
    GestureClassifier, GestureConfig, GestureEvent, LongPressTimer, SwipeDirection, TimerHandle,
    TouchSample,
};
