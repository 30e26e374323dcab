//! Mode geometry: turns renderer state into bounds and draw commands.
//!
//! ## Usage
//!
//! [`ChartMode`] selects the strategy. Both strategies share the content box
//! computation and the centered label; they differ in how the background and
//! the progress are shaped.

mod pie;
mod ring;

use glam::Vec2;
use smallvec::SmallVec;

use crate::{
    RendererState,
    host::{Canvas, DrawCommand, TextCommand},
};

pub use pie::PieGeometry;
pub use ring::RingGeometry;

/// Commands emitted for one frame, sized for background, progress and label.
pub type DrawCommands = SmallVec<[DrawCommand; 3]>;

/// Direction in which progress sweeps from the start angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    /// Positive angle increments.
    #[default]
    Clockwise,
    /// Negative angle increments.
    CounterClockwise,
}

impl Orientation {
    /// Maps a selector index (`0` clockwise, `1` counterclockwise).
    pub fn from_index(index: i32) -> Self {
        if index == 1 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    /// Applies the direction to an unsigned sweep.
    pub fn signed_sweep(self, sweep_degrees: f32) -> f32 {
        match self {
            Self::Clockwise => sweep_degrees,
            Self::CounterClockwise => -sweep_degrees,
        }
    }
}

/// Representation of the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ChartMode {
    /// Progress drawn as an arc stroke.
    #[default]
    Ring,
    /// Progress drawn as a filled wedge.
    Pie,
}

static RING: RingGeometry = RingGeometry;
static PIE: PieGeometry = PieGeometry;

impl ChartMode {
    /// Maps a selector index (`0` ring, `1` pie).
    pub fn from_index(index: i32) -> Self {
        if index == 1 { Self::Pie } else { Self::Ring }
    }

    /// The geometry strategy of this mode.
    pub fn geometry(self) -> &'static dyn ModeGeometry {
        match self {
            Self::Ring => &RING,
            Self::Pie => &PIE,
        }
    }
}

/// Insets between the widget edges and the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Left inset.
    pub left: f32,
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
}

impl Padding {
    /// No insets.
    pub const ZERO: Padding = Padding::all(0.0);

    /// The same inset on every side.
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Circle geometry computed by [`ModeGeometry::measure`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartBounds {
    /// Chart center in widget coordinates.
    pub center: Vec2,
    /// Radius of the progress shape (arc center line or wedge radius).
    pub radius: f32,
    /// Inner radius of the background, zero for a disc.
    pub background_inner_radius: f32,
    /// Outer radius of the background.
    pub background_outer_radius: f32,
}

/// Largest centered circle fitting the padded content box: `(center, diameter)`.
pub fn content_circle(width: f32, height: f32, padding: Padding) -> (Vec2, f32) {
    let content_width = (width - padding.left - padding.right).max(0.0);
    let content_height = (height - padding.top - padding.bottom).max(0.0);
    let center = Vec2::new(
        padding.left + content_width / 2.0,
        padding.top + content_height / 2.0,
    );
    (center, content_width.min(content_height))
}

/// Geometry strategy shared by ring and pie charts.
pub trait ModeGeometry: Send + Sync {
    /// Whether the background is drawn when the configuration is silent.
    fn draws_background_by_default(&self) -> bool;

    /// Computes bounds for a widget of `width` x `height` with `padding`.
    fn measure(&self, state: &RendererState, width: f32, height: f32, padding: Padding)
    -> ChartBounds;

    /// Background and progress commands, in paint order.
    fn shape_commands(&self, state: &RendererState, bounds: &ChartBounds) -> DrawCommands;

    /// All commands for one frame: shapes, then the label.
    fn commands(&self, state: &RendererState, bounds: &ChartBounds) -> DrawCommands {
        let mut commands = self.shape_commands(state, bounds);
        if let Some(text) = text_command(state, bounds) {
            commands.push(text);
        }
        commands
    }

    /// Emits one frame into `canvas`.
    fn draw(&self, state: &RendererState, bounds: &ChartBounds, canvas: &mut dyn Canvas) {
        for command in self.commands(state, bounds) {
            canvas.draw(command);
        }
    }
}

/// The label, horizontally centered with its baseline half a text height
/// below the chart center.
fn text_command(state: &RendererState, bounds: &ChartBounds) -> Option<DrawCommand> {
    let text = state.text();
    if text.is_empty() {
        return None;
    }
    let metrics = state.text_metrics();
    Some(DrawCommand::Text(TextCommand {
        text,
        origin: Vec2::new(bounds.center.x, bounds.center.y + metrics.height / 2.0),
        paint: state.text_paint(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_circle_uses_smaller_side() {
        let (center, diameter) = content_circle(200.0, 100.0, Padding::ZERO);
        assert_eq!(center, Vec2::new(100.0, 50.0));
        assert_eq!(diameter, 100.0);
    }

    #[test]
    fn test_content_circle_respects_padding() {
        let padding = Padding {
            left: 10.0,
            top: 20.0,
            right: 30.0,
            bottom: 0.0,
        };
        let (center, diameter) = content_circle(140.0, 120.0, padding);
        assert_eq!(center, Vec2::new(60.0, 70.0));
        assert_eq!(diameter, 100.0);

        let (_, collapsed) = content_circle(10.0, 10.0, Padding::all(20.0));
        assert_eq!(collapsed, 0.0);
    }

    #[test]
    fn test_orientation_signs_sweep() {
        assert_eq!(Orientation::Clockwise.signed_sweep(90.0), 90.0);
        assert_eq!(Orientation::CounterClockwise.signed_sweep(90.0), -90.0);
        assert_eq!(Orientation::from_index(1), Orientation::CounterClockwise);
        assert_eq!(Orientation::from_index(5), Orientation::Clockwise);
    }

    #[test]
    fn test_mode_defaults() {
        assert!(!ChartMode::Ring.geometry().draws_background_by_default());
        assert!(ChartMode::Pie.geometry().draws_background_by_default());
        assert_eq!(ChartMode::from_index(1), ChartMode::Pie);
    }
}
