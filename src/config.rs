use core::fmt;

/// Rejected configuration value. Field names use the dotted path an override
/// file would use (`gesture.tap_timeout_ms`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonPositive(&'static str),
    NotFinite(&'static str),
    BelowMinimum {
        field: &'static str,
        minimum: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive(field) => write!(f, "{field} must be > 0"),
            Self::NotFinite(field) => write!(f, "{field} must be a finite number"),
            Self::BelowMinimum { field, minimum } => write!(f, "{field} must be >= {minimum}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn positive_px(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(field));
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive(field));
    }
    Ok(())
}

pub(crate) fn positive_ms(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositive(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        assert_eq!(
            ConfigError::NonPositive("pull.threshold_px").to_string(),
            "pull.threshold_px must be > 0"
        );
        assert_eq!(
            ConfigError::BelowMinimum {
                field: "pull.max_pull_factor",
                minimum: "1.0",
            }
            .to_string(),
            "pull.max_pull_factor must be >= 1.0"
        );
    }

    #[test]
    fn nan_is_rejected_before_sign_check() {
        assert_eq!(
            positive_px("gesture.swipe_threshold_px", f32::NAN),
            Err(ConfigError::NotFinite("gesture.swipe_threshold_px"))
        );
        assert_eq!(
            positive_px("gesture.swipe_threshold_px", -1.0),
            Err(ConfigError::NonPositive("gesture.swipe_threshold_px"))
        );
        assert!(positive_ms("gesture.tap_timeout_ms", 1).is_ok());
    }
}
