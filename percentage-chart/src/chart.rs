//! The chart widget: renderer state plus the active mode geometry.

use std::{sync::Arc, time::Duration};

use tracing::debug;

use crate::{
    ChartError, ChartMode, PercentageChartArgs, RendererState,
    geometry::{ChartBounds, DrawCommands, Padding},
    host::{Canvas, ChartHost},
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutSize {
    width: f32,
    height: f32,
    padding: Padding,
}

/// A ring or pie percentage chart bound to a host view.
#[derive(Debug)]
pub struct PercentageChart {
    state: RendererState,
    mode: ChartMode,
    layout: Option<LayoutSize>,
}

impl PercentageChart {
    /// Creates a chart with plain defaults.
    pub fn new(mode: ChartMode, host: Arc<dyn ChartHost>) -> Self {
        Self {
            state: RendererState::new(mode, host),
            mode,
            layout: None,
        }
    }

    /// Creates a chart from a configuration snapshot.
    pub fn from_args(mode: ChartMode, args: PercentageChartArgs, host: Arc<dyn ChartHost>) -> Self {
        Self {
            state: RendererState::from_args(mode, args, host),
            mode,
            layout: None,
        }
    }

    /// Active representation.
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    /// Switches between ring and pie. State and in-flight animations are kept.
    pub fn set_mode(&mut self, mode: ChartMode) {
        if self.mode == mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "chart mode switched");
        self.mode = mode;
        if let Some(layout) = self.layout {
            let bounds = self.compute_bounds(layout);
            self.state.set_bounds(bounds);
        }
        self.state.request_layout();
        self.state.invalidate();
    }

    /// The renderer state.
    pub fn state(&self) -> &RendererState {
        &self.state
    }

    /// The renderer state, for its setters.
    pub fn state_mut(&mut self) -> &mut RendererState {
        &mut self.state
    }

    fn compute_bounds(&self, layout: LayoutSize) -> ChartBounds {
        self.mode
            .geometry()
            .measure(&self.state, layout.width, layout.height, layout.padding)
    }

    /// Lays the chart out in a `width` x `height` view.
    pub fn measure(&mut self, width: f32, height: f32, padding: Padding) -> Result<ChartBounds, ChartError> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(ChartError::InvalidSize { width, height });
        }
        let layout = LayoutSize {
            width,
            height,
            padding,
        };
        let bounds = self.compute_bounds(layout);
        self.layout = Some(layout);
        self.state.set_bounds(bounds);
        Ok(bounds)
    }

    fn frame_bounds(&mut self) -> Result<ChartBounds, ChartError> {
        if self.state.is_destroyed() {
            return Err(ChartError::Destroyed);
        }
        let layout = self.layout.ok_or(ChartError::NotMeasured)?;
        // Thickness and offset may have changed since the last measure.
        let bounds = self.compute_bounds(layout);
        self.state.set_bounds(bounds);
        Ok(bounds)
    }

    /// Commands of the next frame, in paint order.
    pub fn commands(&mut self) -> Result<DrawCommands, ChartError> {
        let bounds = self.frame_bounds()?;
        Ok(self.mode.geometry().commands(&self.state, &bounds))
    }

    /// Draws the next frame into `canvas`.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) -> Result<(), ChartError> {
        let bounds = self.frame_bounds()?;
        self.mode.geometry().draw(&self.state, &bounds, canvas);
        Ok(())
    }

    /// Advances animations; see [`RendererState::tick`].
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.state.tick(dt)
    }

    /// Copies the state of this chart into `other`, sharing animators.
    pub fn mirror_into(&self, other: &mut PercentageChart) {
        self.state.mirror(&mut other.state);
    }

    /// Detaches the chart from its host and stops its animations.
    pub fn destroy(&mut self) {
        self.state.destroy();
    }
}
