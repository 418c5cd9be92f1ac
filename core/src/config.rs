use crate::style::CursorStyle;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LERP_FACTOR: f32 = 0.15;
pub const DEFAULT_FOLLOWER_FACTOR: f32 = 0.2;

/// Tunables for a [`CursorManager`][crate::CursorManager] and the views following it.
///
/// ```
/// use cursorkit_core::{CursorConfigBuilder, CursorStyle};
///
/// let config = CursorConfigBuilder::default()
///     .lerp_factor(0.3)
///     .base_style(CursorStyle::Crosshair)
///     .build()
///     .unwrap();
/// assert_eq!(config.lerp_factor, 0.3);
/// ```
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct CursorConfig {
    /// How far the smoothed position moves toward the pointer each frame.
    #[builder(default = "DEFAULT_LERP_FACTOR")]
    pub lerp_factor: f32,
    #[builder(default, setter(into))]
    pub base_style: CursorStyle,
    /// Throttle window for sampled position updates. `0` disables throttling.
    #[builder(default = "0")]
    pub sample_window_ms: u64,
    /// Factor used by followers that keep their own interpolation state.
    #[builder(default = "DEFAULT_FOLLOWER_FACTOR")]
    pub follower_factor: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            lerp_factor: DEFAULT_LERP_FACTOR,
            base_style: CursorStyle::Default,
            sample_window_ms: 0,
            follower_factor: DEFAULT_FOLLOWER_FACTOR,
        }
    }
}

impl CursorConfig {
    pub fn sample_window(&self) -> Duration {
        Duration::from_millis(self.sample_window_ms)
    }
}

impl CursorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        for (name, factor) in [
            ("lerp_factor", self.lerp_factor),
            ("follower_factor", self.follower_factor),
        ] {
            if let Some(f) = factor {
                if !f.is_finite() || f <= 0. {
                    return Err(format!("{name} must be a positive finite number, got {f}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = CursorConfigBuilder::default().build().unwrap();
        assert_eq!(built, CursorConfig::default());
    }

    #[test]
    fn test_builder_rejects_bad_factor() {
        assert!(CursorConfigBuilder::default()
            .lerp_factor(f32::NAN)
            .build()
            .is_err());
        assert!(CursorConfigBuilder::default()
            .follower_factor(-1.)
            .build()
            .is_err());
    }

    #[test]
    fn test_base_style_setter_accepts_tokens() {
        let config = CursorConfigBuilder::default()
            .base_style("grab")
            .sample_window_ms(16)
            .build()
            .unwrap();
        assert_eq!(config.base_style, CursorStyle::Grab);
        assert_eq!(config.sample_window(), Duration::from_millis(16));
    }
}
