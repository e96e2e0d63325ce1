use crate::config::{positive_px, ConfigError};

pub const PULL_REFRESH_THRESHOLD_PX: f32 = 80.0;
pub const MAX_PULL_FACTOR: f32 = 1.5;
pub const PREVENT_SCROLL_PX: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullConfig {
    /// Release at or beyond this distance triggers a refresh.
    pub threshold_px: f32,
    /// Pull distance is clamped to `threshold_px * max_pull_factor`.
    pub max_pull_factor: f32,
    /// Past this drag the host is asked to suppress native overscroll.
    pub prevent_scroll_px: f32,
}

impl PullConfig {
    pub fn max_pull_px(&self) -> f32 {
        self.threshold_px * self.max_pull_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_px("pull.threshold_px", self.threshold_px)?;
        positive_px("pull.max_pull_factor", self.max_pull_factor)?;
        positive_px("pull.prevent_scroll_px", self.prevent_scroll_px)?;
        // A cap below the threshold would make refresh unreachable.
        if self.max_pull_factor < 1.0 {
            return Err(ConfigError::BelowMinimum {
                field: "pull.max_pull_factor",
                minimum: "1.0",
            });
        }
        Ok(())
    }
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold_px: PULL_REFRESH_THRESHOLD_PX,
            max_pull_factor: MAX_PULL_FACTOR,
            prevent_scroll_px: PREVENT_SCROLL_PX,
        }
    }
}
