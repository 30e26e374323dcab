//! Adaptive colors: background and text tints derived from the progress color.
//!
//! ## Usage
//!
//! Keep the label and the chart background readable while the progress color
//! changes, either by deriving shades with [`adapt`] or by plugging in an
//! [`AdaptiveColorProvider`].

use crate::Color;

/// Direction in which an adaptive color is derived from its base color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AdaptiveMode {
    /// Scale every channel toward black.
    Darker,
    /// Blend every channel toward white.
    Lighter,
}

impl AdaptiveMode {
    /// Maps a selector index (`0` darker, `1` lighter) to a mode.
    ///
    /// Any other index means "unset".
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Darker),
            1 => Some(Self::Lighter),
            _ => None,
        }
    }
}

/// Returns `true` when `ratio` can drive an adaptive computation.
#[inline]
pub fn is_valid_ratio(ratio: f32) -> bool {
    (0.0..=1.0).contains(&ratio)
}

/// Derives a shade or tint of `base`.
///
/// A ratio outside `0.0..=1.0` (including NaN and the `-1` sentinel) is
/// treated as unset and returns `base` unchanged. Alpha is never touched.
///
/// ```
/// use percentage_chart::{Color, adaptive::{AdaptiveMode, adapt}};
///
/// let base = Color::from_argb(0xFF80_4020);
/// assert_eq!(adapt(base, 0.5, AdaptiveMode::Darker), Color::from_argb(0xFF40_2010));
/// ```
pub fn adapt(base: Color, ratio: f32, mode: AdaptiveMode) -> Color {
    if !is_valid_ratio(ratio) {
        return base;
    }
    let channel = |c: u8| -> u8 {
        let c = c as f32;
        let value = match mode {
            AdaptiveMode::Darker => c * (1.0 - ratio),
            AdaptiveMode::Lighter => c + (255.0 - c) * ratio,
        };
        value.round().clamp(0.0, 255.0) as u8
    };
    Color::new(channel(base.r), channel(base.g), channel(base.b), base.a)
}

/// Adaptive configuration for one derived color (background or text).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdaptiveColor {
    /// Whether the derived color replaces the configured one.
    pub enabled: bool,
    /// Ratio in `0.0..=1.0`, `None` when unset.
    pub ratio: Option<f32>,
    /// Derivation mode, `None` when unset.
    pub mode: Option<AdaptiveMode>,
}

impl AdaptiveColor {
    /// Builds an enabled configuration, dropping an out-of-range ratio.
    pub fn new(ratio: f32, mode: Option<AdaptiveMode>) -> Self {
        Self {
            enabled: true,
            ratio: is_valid_ratio(ratio).then_some(ratio),
            mode,
        }
    }

    /// Applies the configuration to `base`. Unset ratio or mode keeps `base`.
    pub fn apply(&self, base: Color) -> Color {
        match (self.ratio, self.mode) {
            (Some(ratio), Some(mode)) => adapt(base, ratio, mode),
            _ => base,
        }
    }
}

/// External authority for progress-dependent colors.
///
/// While a provider is installed the chart ignores direct progress,
/// background and text color setters.
pub trait AdaptiveColorProvider: Send + Sync {
    /// Progress color for the given progress in `0.0..=100.0`.
    fn provide_progress_color(&self, progress: f32) -> Color;

    /// Background color override; `None` derives it from the progress color.
    fn provide_background_color(&self, _progress: f32) -> Option<Color> {
        None
    }

    /// Text color override; `None` derives it from the progress color.
    fn provide_text_color(&self, _progress: f32) -> Option<Color> {
        None
    }
}

impl<F> AdaptiveColorProvider for F
where
    F: Fn(f32) -> Color + Send + Sync,
{
    fn provide_progress_color(&self, progress: f32) -> Color {
        self(progress)
    }
}
