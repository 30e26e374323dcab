//! Animated ring and pie percentage indicators.
//!
//! # Usage
//!
//! A [`PercentageChart`] owns a [`RendererState`] and draws it through the
//! geometry of its [`ChartMode`]. The host view implements [`host::ChartHost`]
//! to receive redraw and layout signals and to measure text, and a
//! [`host::Canvas`] to receive draw commands.
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use percentage_chart::{
//!     ChartMode, PercentageChart,
//!     geometry::Padding,
//!     host::{ChartHost, DrawCommand},
//!     text::{TextMetrics, TextPaint},
//! };
//!
//! struct Headless;
//!
//! impl ChartHost for Headless {
//!     fn invalidate(&self) {}
//!     fn request_layout(&self) {}
//!     fn measure_text(&self, text: &str, paint: &TextPaint) -> TextMetrics {
//!         TextMetrics {
//!             width: text.len() as f32 * paint.size * 0.6,
//!             height: paint.size,
//!         }
//!     }
//! }
//!
//! let mut chart = PercentageChart::new(ChartMode::Ring, Arc::new(Headless));
//! chart.state_mut().set_progress(75.0, true);
//! while chart.tick(Duration::from_millis(16)) {}
//!
//! chart.measure(200.0, 200.0, Padding::all(8.0))?;
//! let mut frame: Vec<DrawCommand> = Vec::new();
//! chart.draw(&mut frame)?;
//! assert_eq!(chart.state().text(), "75");
//! # Ok::<(), percentage_chart::ChartError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod adaptive;
pub mod animation;
mod chart;
pub mod color;
pub mod config;
pub mod easing;
mod error;
pub mod geometry;
pub mod host;
mod state;
pub mod text;
pub mod theme;

pub use crate::{
    adaptive::{AdaptiveColorProvider, AdaptiveMode},
    animation::{AnimationController, CompletionCallback},
    chart::PercentageChart,
    color::Color,
    config::{PercentageChartArgs, PercentageChartArgsBuilder},
    easing::EasingCurve,
    error::ChartError,
    geometry::{ChartMode, Orientation},
    state::{MAX_PROGRESS, ProgressListener, RendererState},
};
