mod binding;
pub mod config;
mod controller;
mod gate;

pub use binding::{HostSurface, PullToRefresh, RefreshCallback, RefreshOutcome};
pub use config::PullConfig;
pub use controller::{PullMove, PullPhase, PullRelease, PullState, PullToRefreshController};
pub use gate::{Invocation, RefreshGate, RefreshPermit};
