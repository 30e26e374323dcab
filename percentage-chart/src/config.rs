//! Configuration snapshot a chart is built from.
//!
//! ## Usage
//!
//! Build [`PercentageChartArgs`] in code with [`PercentageChartArgsBuilder`],
//! or (with the `serde` feature) load it from JSON. Values are validated when
//! the snapshot is turned into a [`crate::RendererState`], not here.

use std::sync::Arc;

use derive_builder::Builder;

use crate::{
    AdaptiveMode, Color, EasingCurve, Orientation,
    animation::DEFAULT_ANIMATION_DURATION,
    host::ArcCap,
    text::{TextShadow, TextStyle},
};

/// Default ring thickness in density-independent pixels.
pub const DEFAULT_PROGRESS_BAR_THICKNESS_DP: f32 = 16.0;

/// Default start angle in degrees.
pub const DEFAULT_START_ANGLE: f32 = 0.0;

/// Arguments for configuring a percentage chart.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PercentageChartArgs {
    /// Sweep direction.
    #[builder(default)]
    pub orientation: Orientation,
    /// Start angle in degrees, `0.0..=360.0`; 0° is at 3 o'clock.
    #[builder(default = "DEFAULT_START_ANGLE")]
    pub start_angle: f32,
    /// Whether the background is drawn; `None` uses the mode default.
    #[builder(default, setter(strip_option))]
    pub draw_background: Option<bool>,
    /// Background color.
    #[builder(default = "Color::BLACK")]
    pub background_color: Color,
    /// Background inset in pixels.
    #[builder(default)]
    pub background_offset: f32,
    /// Initial progress, `0.0..=100.0`.
    #[builder(default)]
    pub progress: f32,
    /// Progress color; `None` uses the host accent color.
    #[builder(default, setter(strip_option))]
    pub progress_color: Option<Color>,
    /// Animation duration in milliseconds.
    #[builder(default = "DEFAULT_ANIMATION_DURATION.as_millis() as u64")]
    pub animation_duration_ms: u64,
    /// Animation easing curve.
    #[builder(default)]
    pub easing: EasingCurve,
    /// Label color.
    #[builder(default = "Color::WHITE")]
    pub text_color: Color,
    /// Label size in pixels; `None` uses 12sp at the host scale factor.
    #[builder(default, setter(strip_option))]
    pub text_size: Option<f32>,
    /// Label font family resolved by the host.
    #[builder(default, setter(strip_option, into))]
    pub typeface: Option<Arc<str>>,
    /// Label style.
    #[builder(default)]
    pub text_style: TextStyle,
    /// Label shadow; ignored while its color is transparent.
    #[builder(default)]
    pub text_shadow: TextShadow,
    /// Whether the background color is derived from the progress color.
    #[builder(default)]
    pub adaptive_background: bool,
    /// Ratio for the derived background color; outside `0.0..=1.0` is unset.
    #[builder(default = "-1.0")]
    pub adaptive_background_ratio: f32,
    /// Mode for the derived background color.
    #[builder(default, setter(strip_option))]
    pub adaptive_background_mode: Option<AdaptiveMode>,
    /// Whether the label color is derived from the progress color.
    #[builder(default)]
    pub adaptive_text: bool,
    /// Ratio for the derived label color; outside `0.0..=1.0` is unset.
    #[builder(default = "-1.0")]
    pub adaptive_text_ratio: f32,
    /// Mode for the derived label color.
    #[builder(default, setter(strip_option))]
    pub adaptive_text_mode: Option<AdaptiveMode>,
    /// Ring stroke width in pixels; `None` uses 16dp at the host scale factor.
    #[builder(default, setter(strip_option))]
    pub progress_bar_thickness: Option<f32>,
    /// Ring stroke cap.
    #[builder(default)]
    pub progress_bar_cap: ArcCap,
}

impl Default for PercentageChartArgs {
    fn default() -> Self {
        PercentageChartArgsBuilder::default()
            .build()
            .expect("builder construction failed")
    }
}

#[cfg(feature = "serde")]
impl PercentageChartArgs {
    /// Parses a JSON snapshot. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::ChartError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = PercentageChartArgs::default();
        assert_eq!(args.orientation, Orientation::Clockwise);
        assert_eq!(args.start_angle, 0.0);
        assert_eq!(args.draw_background, None);
        assert_eq!(args.background_color, Color::BLACK);
        assert_eq!(args.animation_duration_ms, 400);
        assert_eq!(args.easing, EasingCurve::Linear);
        assert_eq!(args.text_color, Color::WHITE);
        assert_eq!(args.adaptive_background_ratio, -1.0);
        assert_eq!(args.adaptive_text_mode, None);
    }

    #[test]
    fn test_builder_overrides() {
        let args = PercentageChartArgsBuilder::default()
            .progress(37.0)
            .draw_background(true)
            .typeface("serif")
            .easing(EasingCurve::Bounce)
            .adaptive_text_mode(AdaptiveMode::Lighter)
            .build()
            .expect("valid args");
        assert_eq!(args.progress, 37.0);
        assert_eq!(args.draw_background, Some(true));
        assert_eq!(args.typeface.as_deref(), Some("serif"));
        assert_eq!(args.easing, EasingCurve::Bounce);
        assert_eq!(args.adaptive_text_mode, Some(AdaptiveMode::Lighter));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let args = PercentageChartArgs::from_json(
            r#"{ "progress": 12.5, "easing": "fast_out_slow_in", "progress_color": 4286595104 }"#,
        )
        .expect("valid json");
        assert_eq!(args.progress, 12.5);
        assert_eq!(args.easing, EasingCurve::FastOutSlowIn);
        assert_eq!(args.progress_color, Some(Color::from_argb(0xFF80_4020)));
        assert_eq!(args.text_color, Color::WHITE);

        let unknown = PercentageChartArgs::from_json(r#"{ "easing": "wobble" }"#).expect("valid json");
        assert_eq!(unknown.easing, EasingCurve::Linear);

        assert!(PercentageChartArgs::from_json("{ not json").is_err());
    }
}
