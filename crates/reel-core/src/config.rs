//! Carousel configuration.
//!
//! Built like a modifier chain:
//!
//! ```rust
//! use reel_core::config::{CarouselConfig, CarouselMode};
//!
//! let cfg = CarouselConfig::default()
//!     .mode(CarouselMode::Scale)
//!     .drag_threshold(12.0);
//! assert!(cfg.validate().is_ok());
//! ```

use crate::error::ConfigError;
use web_time::Duration;

/// Which of the two interaction styles the carousel runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CarouselMode {
    /// One tile per wheel gesture; drags snap to the nearest tile on release.
    #[default]
    Snap,
    /// Free scrolling with continuous center-weighted tile scaling.
    Scale,
}

/// Names the DOM binding looks for and writes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Hooks {
    pub container_id: String,
    pub tile_selector: String,
    /// `data-*` attribute (full name) flagging the initial tile with `"true"`.
    pub initial_attr: String,
    pub active_class: String,
    pub dragging_class: String,
    /// CSS custom property receiving the per-tile scale.
    pub scale_var: String,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            container_id: "workScroller".into(),
            tile_selector: ".work-card".into(),
            initial_attr: "data-initial".into(),
            active_class: "is-active".into(),
            dragging_class: "is-dragging".into(),
            scale_var: "--scale".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    pub mode: CarouselMode,
    /// `k` in `1 + k * (1 - d)^2`.
    pub scale_gain: f32,
    /// Horizontal travel (px) after which a press counts as a drag.
    pub drag_threshold: f32,
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub settle_delay: Duration,
    /// Pixels per wheel line (`deltaMode == 1`).
    pub line_height: f32,
    pub hooks: Hooks,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            mode: CarouselMode::Snap,
            scale_gain: 0.16,
            drag_threshold: 8.0,
            settle_delay: Duration::from_millis(140),
            line_height: 16.0,
            hooks: Hooks::default(),
        }
    }
}

impl CarouselConfig {
    pub fn mode(mut self, mode: CarouselMode) -> Self {
        self.mode = mode;
        self
    }
    pub fn scale_gain(mut self, k: f32) -> Self {
        self.scale_gain = k;
        self
    }
    pub fn drag_threshold(mut self, px: f32) -> Self {
        self.drag_threshold = px;
        self
    }
    pub fn settle_delay(mut self, d: Duration) -> Self {
        self.settle_delay = d;
        self
    }
    pub fn line_height(mut self, px: f32) -> Self {
        self.line_height = px;
        self
    }
    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("scale_gain", self.scale_gain),
            ("drag_threshold", self.drag_threshold),
            ("line_height", self.line_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NotNonNegative { name, value });
            }
        }
        if self.settle_delay.is_zero() {
            return Err(ConfigError::ZeroSettleDelay);
        }
        let h = &self.hooks;
        for (name, value) in [
            ("container_id", &h.container_id),
            ("tile_selector", &h.tile_selector),
            ("initial_attr", &h.initial_attr),
            ("active_class", &h.active_class),
            ("dragging_class", &h.dragging_class),
            ("scale_var", &h.scale_var),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use web_time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
