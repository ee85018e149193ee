//! Widget configuration.
//!
//! `CardStyle` holds every constant the widget derives its geometry and
//! timing from. Geometry constants are given at the nominal scale and
//! multiplied by `ui_scale`, the same way the host toolkit zooms its own
//! metrics.

use serde::{de, Deserialize, Deserializer, Serialize};
use smallvec::{smallvec, SmallVec};
use std::time::Duration;

use super::color::Color;
use super::error::CardError;

/// Scale factors of the flip animation, one per step.
pub type StepScales = SmallVec<[f32; 8]>;

/// Geometry, timing and defaults shared by cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    /// UI zoom factor applied to `radius_base` and `border_base`.
    pub ui_scale: f32,

    /// Corner radius before scaling.
    pub radius_base: u32,

    /// Border (stroke) width before scaling.
    pub border_base: u32,

    /// Total inset between card edge and image; the image is scaled to
    /// `size - image_inset` and drawn at `image_inset / 2`.
    pub image_inset: u32,

    /// Outline color of a highlighted card.
    pub highlight_color: Color,

    /// Outline width of a highlighted card.
    pub highlight_width: f32,

    /// Delay between animation steps.
    pub step_interval_ms: u64,

    /// Vertical scale of each animation step. Never empty.
    #[serde(deserialize_with = "non_empty_steps")]
    pub step_scales: StepScales,

    /// Font family used when a card is built without one.
    pub default_font: String,

    /// Background used when a card is built without one.
    pub default_background: Color,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            ui_scale: 0.72,
            radius_base: 60,
            border_base: 10,
            image_inset: 22,
            highlight_color: Color::WHITE,
            highlight_width: 6.0,
            step_interval_ms: 100,
            step_scales: smallvec![0.66, 0.33, 0.10, 0.33, 0.66],
            default_font: "Sans".to_string(),
            default_background: Color::BLACK,
        }
    }
}

impl CardStyle {
    /// Set the UI zoom factor.
    #[must_use]
    pub fn with_ui_scale(mut self, scale: f32) -> Self {
        assert!(scale > 0.0, "UI scale must be positive");
        self.ui_scale = scale;
        self
    }

    /// Replace the animation step scales.
    #[must_use]
    pub fn with_step_scales(mut self, scales: &[f32]) -> Self {
        assert!(!scales.is_empty(), "Animation needs at least one step");
        self.step_scales = scales.iter().copied().collect();
        self
    }

    /// Set the delay between animation steps.
    #[must_use]
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set the highlight outline.
    #[must_use]
    pub fn with_highlight(mut self, color: Color, width: f32) -> Self {
        self.highlight_color = color;
        self.highlight_width = width;
        self
    }

    /// Set the fallback font family.
    #[must_use]
    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// Corner radius in pixels.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.zoom(self.radius_base) as f32
    }

    /// Border width in pixels.
    #[must_use]
    pub fn border_width(&self) -> u32 {
        self.zoom(self.border_base)
    }

    /// Offset of the image from the card origin.
    #[must_use]
    pub fn image_padding(&self) -> u32 {
        self.image_inset / 2
    }

    /// Edge length images are scaled to on a card of `size`.
    #[must_use]
    pub fn image_edge(&self, size: u32) -> u32 {
        size.saturating_sub(self.image_inset)
    }

    /// Delay between animation steps.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// Number of animation steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.step_scales.len()
    }

    fn zoom(&self, value: u32) -> u32 {
        (value as f32 * self.ui_scale) as u32
    }
}

fn non_empty_steps<'de, D>(deserializer: D) -> std::result::Result<StepScales, D::Error>
where
    D: Deserializer<'de>,
{
    let scales = StepScales::deserialize(deserializer)?;
    if scales.is_empty() {
        return Err(de::Error::custom(CardError::InvalidStyle {
            reason: "animation needs at least one step".to_string(),
        }));
    }
    Ok(scales)
}
