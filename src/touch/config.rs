use crate::config::{positive_ms, positive_px, ConfigError};

pub const LONG_PRESS_DELAY_MS: u64 = 500;
pub const JITTER_THRESHOLD_PX: f32 = 10.0;

/// Gesture thresholds.
///
/// Two presets exist because the mobile settings table and the gesture hook
/// disagree: the settings table says swipe 50 px / tap 300 ms, the hook's own
/// table says swipe 10 px / tap 200 ms. Neither is assumed to be the intended
/// one; `Default` picks the settings table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub long_press_delay_ms: u64,
    pub tap_timeout_ms: u64,
    pub swipe_threshold_px: f32,
    /// Motion below this is finger noise: it keeps a tap a tap and leaves
    /// the long-press timer armed.
    pub jitter_threshold_px: f32,
}

impl GestureConfig {
    pub const MOBILE_DEFAULTS: Self = Self {
        long_press_delay_ms: LONG_PRESS_DELAY_MS,
        tap_timeout_ms: 300,
        swipe_threshold_px: 50.0,
        jitter_threshold_px: JITTER_THRESHOLD_PX,
    };

    pub const HOOK_LOCAL: Self = Self {
        long_press_delay_ms: LONG_PRESS_DELAY_MS,
        tap_timeout_ms: 200,
        swipe_threshold_px: 10.0,
        jitter_threshold_px: JITTER_THRESHOLD_PX,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_ms("gesture.long_press_delay_ms", self.long_press_delay_ms)?;
        positive_ms("gesture.tap_timeout_ms", self.tap_timeout_ms)?;
        positive_px("gesture.swipe_threshold_px", self.swipe_threshold_px)?;
        positive_px("gesture.jitter_threshold_px", self.jitter_threshold_px)?;
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::MOBILE_DEFAULTS
    }
}
