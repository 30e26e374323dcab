use crate::{
    RendererState,
    geometry::{ChartBounds, DrawCommands, ModeGeometry, Padding, content_circle},
    host::DrawCommand,
};

/// Progress as a filled wedge over a background disc.
#[derive(Clone, Copy, Debug, Default)]
pub struct PieGeometry;

impl ModeGeometry for PieGeometry {
    fn draws_background_by_default(&self) -> bool {
        true
    }

    fn measure(
        &self,
        state: &RendererState,
        width: f32,
        height: f32,
        padding: Padding,
    ) -> ChartBounds {
        let (center, diameter) = content_circle(width, height, padding);
        let radius = diameter / 2.0;
        let offset = state.background_offset().unwrap_or_default();

        ChartBounds {
            center,
            radius,
            background_inner_radius: 0.0,
            background_outer_radius: (radius - offset).max(0.0),
        }
    }

    fn shape_commands(&self, state: &RendererState, bounds: &ChartBounds) -> DrawCommands {
        let mut commands = DrawCommands::new();

        if let Some(color) = state.background_color()
            && bounds.background_outer_radius > 0.0
        {
            commands.push(DrawCommand::Disc {
                center: bounds.center,
                radius: bounds.background_outer_radius,
                color,
            });
        }

        let sweep = state.sweep_angle();
        if sweep > 0.0 {
            commands.push(DrawCommand::Wedge {
                center: bounds.center,
                radius: bounds.radius,
                start_angle_degrees: state.start_angle(),
                sweep_angle_degrees: state.orientation().signed_sweep(sweep),
                color: state.progress_color(),
            });
        }

        commands
    }
}
