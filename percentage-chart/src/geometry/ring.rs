use crate::{
    RendererState,
    geometry::{ChartBounds, DrawCommands, ModeGeometry, Padding, content_circle},
    host::{DrawCommand, ProgressArcCommand},
};

/// Progress as an arc stroke over an optional background annulus.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingGeometry;

impl ModeGeometry for RingGeometry {
    fn draws_background_by_default(&self) -> bool {
        false
    }

    fn measure(
        &self,
        state: &RendererState,
        width: f32,
        height: f32,
        padding: Padding,
    ) -> ChartBounds {
        let (center, diameter) = content_circle(width, height, padding);
        let thickness = state.progress_bar_thickness().min(diameter);
        let radius = ((diameter - thickness) / 2.0).max(0.0);
        let offset = state.background_offset().unwrap_or_default();
        let half = thickness / 2.0;

        ChartBounds {
            center,
            radius,
            background_inner_radius: (radius - half - offset).max(0.0),
            background_outer_radius: (radius + half - offset).max(0.0),
        }
    }

    fn shape_commands(&self, state: &RendererState, bounds: &ChartBounds) -> DrawCommands {
        let mut commands = DrawCommands::new();

        if let Some(color) = state.background_color()
            && bounds.background_outer_radius > bounds.background_inner_radius
        {
            commands.push(DrawCommand::Annulus {
                center: bounds.center,
                inner_radius: bounds.background_inner_radius,
                outer_radius: bounds.background_outer_radius,
                color,
            });
        }

        let sweep = state.sweep_angle();
        if sweep > 0.0 {
            commands.push(DrawCommand::Arc(ProgressArcCommand {
                center: bounds.center,
                radius: bounds.radius,
                color: state.progress_color(),
                stroke_width_px: state.progress_bar_thickness(),
                start_angle_degrees: state.start_angle(),
                sweep_angle_degrees: state.orientation().signed_sweep(sweep),
                cap: state.progress_bar_cap(),
            }));
        }

        commands
    }
}
