use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tactile::{GestureConfig, PullConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    MobileDefaults,
    HookLocal,
}

impl Preset {
    pub fn gesture(self) -> GestureConfig {
        match self {
            Self::MobileDefaults => GestureConfig::MOBILE_DEFAULTS,
            Self::HookLocal => GestureConfig::HOOK_LOCAL,
        }
    }
}

/// Optional TOML overrides layered on top of a preset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayConfig {
    pub preset: Option<Preset>,
    #[serde(default)]
    pub gesture: GestureOverrides,
    #[serde(default)]
    pub pull: PullOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GestureOverrides {
    pub long_press_delay_ms: Option<u64>,
    pub tap_timeout_ms: Option<u64>,
    pub swipe_threshold_px: Option<f32>,
    pub jitter_threshold_px: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PullOverrides {
    pub threshold_px: Option<f32>,
    pub max_pull_factor: Option<f32>,
    pub prevent_scroll_px: Option<f32>,
}

impl ReplayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Applies overrides to the chosen preset and validates the result.
    /// `preset` from the command line wins over the file.
    pub fn resolve(&self, preset: Option<Preset>) -> Result<(GestureConfig, PullConfig)> {
        let mut gesture = preset.or(self.preset).unwrap_or_default().gesture();
        let g = &self.gesture;
        if let Some(value) = g.long_press_delay_ms {
            gesture.long_press_delay_ms = value;
        }
        if let Some(value) = g.tap_timeout_ms {
            gesture.tap_timeout_ms = value;
        }
        if let Some(value) = g.swipe_threshold_px {
            gesture.swipe_threshold_px = value;
        }
        if let Some(value) = g.jitter_threshold_px {
            gesture.jitter_threshold_px = value;
        }
        gesture.validate()?;

        let mut pull = PullConfig::default();
        let p = &self.pull;
        if let Some(value) = p.threshold_px {
            pull.threshold_px = value;
        }
        if let Some(value) = p.max_pull_factor {
            pull.max_pull_factor = value;
        }
        if let Some(value) = p.prevent_scroll_px {
            pull.prevent_scroll_px = value;
        }
        pull.validate()?;

        Ok((gesture, pull))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_resolves_to_mobile_defaults() {
        let config = ReplayConfig::parse("").expect("empty config");
        let (gesture, pull) = config.resolve(None).expect("defaults validate");
        assert_eq!(gesture, GestureConfig::MOBILE_DEFAULTS);
        assert_eq!(pull, PullConfig::default());
    }

    #[test]
    fn command_line_preset_wins() {
        let config = ReplayConfig::parse("preset = \"mobile_defaults\"").expect("preset");
        let (gesture, _) = config.resolve(Some(Preset::HookLocal)).expect("valid");
        assert_eq!(gesture, GestureConfig::HOOK_LOCAL);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ReplayConfig::parse(
            "preset = \"hook_local\"\n[gesture]\ntap_timeout_ms = 150\n[pull]\nthreshold_px = 60.0\n",
        )
        .expect("overrides");
        let (gesture, pull) = config.resolve(None).expect("valid");
        assert_eq!(gesture.tap_timeout_ms, 150);
        assert_eq!(gesture.swipe_threshold_px, 10.0);
        assert_eq!(pull.threshold_px, 60.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ReplayConfig::parse("[gesture]\nswipe_px = 3.0\n").is_err());
    }

    #[test]
    fn invalid_override_is_reported_by_field() {
        let config = ReplayConfig::parse("[pull]\nthreshold_px = 0.0\n").expect("parses");
        let err = config.resolve(None).expect_err("zero threshold");
        assert_eq!(err.to_string(), "pull.threshold_px must be > 0");
    }
}
