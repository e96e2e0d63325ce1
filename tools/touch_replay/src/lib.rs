//! Offline replay of recorded touch traces through the gesture classifier
//! and the pull-to-refresh binding.

pub mod config;
pub mod replay;
pub mod trace;

pub use config::{Preset, ReplayConfig};
pub use replay::{replay, ReplayEvent, ReplayOutput, ReplayStats};
pub use trace::{parse_expected_kinds, parse_trace, TracePhase, TraceSample};
