//! Text overlay styling.
//!
//! Shaping and measuring happen in the host; the chart only keeps the paint
//! description and the last measured metrics.

use std::{fmt, sync::Arc};

use crate::Color;

/// Default text size in scale-independent pixels.
pub const DEFAULT_TEXT_SIZE_SP: f32 = 12.0;

/// Weight and slant of the label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TextStyle {
    /// Regular upright text.
    #[default]
    Normal,
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Bold italic text.
    BoldItalic,
}

impl TextStyle {
    /// Maps a selector index (`0` normal, `1` bold, `2` italic, `3` bold italic).
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::Bold,
            2 => Self::Italic,
            3 => Self::BoldItalic,
            _ => Self::Normal,
        }
    }
}

/// Font family handle plus the style applied on top of it.
///
/// The family is an opaque name resolved by the host; `None` is the host's
/// default family.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typeface {
    /// Family or asset name, `None` for the default family.
    pub family: Option<Arc<str>>,
    /// Style applied to the family.
    pub style: TextStyle,
}

impl Typeface {
    /// A named family with normal style.
    pub fn new(family: impl Into<Arc<str>>) -> Self {
        Self {
            family: Some(family.into()),
            style: TextStyle::Normal,
        }
    }

    /// The same family with `style`.
    pub fn with_style(self, style: TextStyle) -> Self {
        Self { style, ..self }
    }
}

/// Drop shadow behind the label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextShadow {
    /// Shadow color; transparent disables the shadow.
    pub color: Color,
    /// Blur radius in pixels.
    pub radius: f32,
    /// Horizontal offset in pixels.
    pub dx: f32,
    /// Vertical offset in pixels.
    pub dy: f32,
}

impl TextShadow {
    /// Whether the shadow draws anything.
    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent()
    }
}

/// Everything the host needs to measure or draw the label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPaint {
    /// Text size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Color,
    /// Family and style.
    pub typeface: Typeface,
    /// Optional drop shadow.
    pub shadow: Option<TextShadow>,
}

/// Size of a measured label in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f32,
    /// Height of the text bounds.
    pub height: f32,
}

/// Turns the displayed integer progress into the label.
#[derive(Clone)]
pub struct TextFormatter(Arc<dyn Fn(i32) -> String + Send + Sync>);

impl TextFormatter {
    /// Wraps `f` as a formatter.
    pub fn new(f: impl Fn(i32) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Formats `value`.
    pub fn format(&self, value: i32) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for TextFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TextFormatter(..)")
    }
}

impl PartialEq for TextFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
