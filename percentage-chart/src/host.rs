//! Interfaces to the host UI toolkit.
//!
//! The host owns the window, the frame clock and the rasterizer. A chart talks
//! to it through [`ChartHost`] signals and emits [`DrawCommand`]s into a
//! [`Canvas`].

use glam::Vec2;

use crate::{
    Color,
    text::{TextMetrics, TextPaint},
};

/// Signals and services a chart needs from the view that hosts it.
pub trait ChartHost: Send + Sync {
    /// Requests a redraw on the next frame.
    fn invalidate(&self);

    /// Requests that bounds are recomputed before the next draw.
    fn request_layout(&self);

    /// The theme accent color, used when no progress color is configured.
    fn theme_accent_color(&self) -> Option<Color> {
        None
    }

    /// Measures `text` as it would be drawn with `paint`.
    fn measure_text(&self, text: &str, paint: &TextPaint) -> TextMetrics;

    /// Physical pixels per density-independent pixel.
    fn scale_factor(&self) -> f32 {
        1.0
    }
}

/// Stroke cap used for arc ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ArcCap {
    /// Rounded stroke ends.
    #[default]
    Round,
    /// Flat stroke ends.
    Butt,
}

/// Draw command for a circular arc stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressArcCommand {
    /// Circle center.
    pub center: Vec2,
    /// Radius of the stroke's center line.
    pub radius: f32,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in physical pixels.
    pub stroke_width_px: f32,
    /// Start angle in degrees, where 0° is at 3 o'clock.
    pub start_angle_degrees: f32,
    /// Sweep angle in degrees; positive is clockwise.
    pub sweep_angle_degrees: f32,
    /// Stroke cap applied to arc ends.
    pub cap: ArcCap,
}

/// Draw command for the centered label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    /// The label.
    pub text: String,
    /// Horizontal center and baseline of the label.
    pub origin: Vec2,
    /// Paint used for the label.
    pub paint: TextPaint,
}

/// A primitive emitted by the chart geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled disc.
    Disc {
        /// Disc center.
        center: Vec2,
        /// Disc radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// A filled circular sector.
    Wedge {
        /// Sector center.
        center: Vec2,
        /// Sector radius.
        radius: f32,
        /// Start angle in degrees, where 0° is at 3 o'clock.
        start_angle_degrees: f32,
        /// Sweep angle in degrees; positive is clockwise.
        sweep_angle_degrees: f32,
        /// Fill color.
        color: Color,
    },
    /// A stroked arc.
    Arc(ProgressArcCommand),
    /// A filled ring between two radii.
    Annulus {
        /// Ring center.
        center: Vec2,
        /// Inner radius, may be zero.
        inner_radius: f32,
        /// Outer radius.
        outer_radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Centered text.
    Text(TextCommand),
}

/// Drawing surface provided by the host.
pub trait Canvas {
    /// Draws one primitive.
    fn draw(&mut self, command: DrawCommand);
}

impl Canvas for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}
