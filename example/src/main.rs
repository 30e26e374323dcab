//! Headless demo: drives a ring and a pie chart with a simulated frame clock
//! and logs the draw commands of each frame.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use parking_lot::Mutex;
use percentage_chart::{
    AdaptiveMode, ChartError, ChartMode, Color, EasingCurve, PercentageChart, PercentageChartArgs,
    geometry::Padding,
    host::{Canvas, ChartHost, DrawCommand},
    text::{TextFormatter, TextMetrics, TextPaint},
};
use tracing::{debug, info};

const FRAME: Duration = Duration::from_millis(16);

const CONFIG: &str = r#"{
    "start_angle": 270.0,
    "draw_background": true,
    "background_offset": 6.0,
    "animation_duration_ms": 600,
    "easing": "fast_out_slow_in",
    "text_size": 28.0,
    "adaptive_background": true,
    "adaptive_background_ratio": 0.6,
    "adaptive_background_mode": "darker",
    "progress_bar_thickness": 18.0
}"#;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,percentage_chart=info,example=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

/// Stands in for a view: remembers whether a frame was requested.
#[derive(Default)]
struct HeadlessHost {
    dirty: AtomicBool,
    layout_dirty: AtomicBool,
}

impl HeadlessHost {
    fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    fn take_layout_dirty(&self) -> bool {
        self.layout_dirty.swap(false, Ordering::SeqCst)
    }
}

impl ChartHost for HeadlessHost {
    fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn request_layout(&self) {
        self.layout_dirty.store(true, Ordering::SeqCst);
    }

    fn theme_accent_color(&self) -> Option<Color> {
        Some(Color::from_rgb(0x21, 0x96, 0xF3))
    }

    fn measure_text(&self, text: &str, paint: &TextPaint) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * paint.size * 0.55,
            height: paint.size,
        }
    }
}

/// Canvas that logs what a rasterizer would paint.
struct LogCanvas<'a> {
    label: &'a str,
}

impl Canvas for LogCanvas<'_> {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Arc(arc) => debug!(
                chart = self.label,
                start = arc.start_angle_degrees,
                sweep = arc.sweep_angle_degrees,
                color = %format!("{:#010x}", arc.color.to_argb()),
                "arc"
            ),
            DrawCommand::Wedge {
                sweep_angle_degrees,
                color,
                ..
            } => debug!(
                chart = self.label,
                sweep = sweep_angle_degrees,
                color = %format!("{:#010x}", color.to_argb()),
                "wedge"
            ),
            DrawCommand::Text(text) => debug!(chart = self.label, text = %text.text, "label"),
            other => debug!(chart = self.label, ?other, "background"),
        }
    }
}

/// Runs frames until the chart settles, drawing only when the host was
/// invalidated.
fn run_until_idle(
    chart: &mut PercentageChart,
    host: &HeadlessHost,
    label: &str,
) -> Result<usize, ChartError> {
    let mut frames = 0;
    loop {
        let changed = chart.tick(FRAME);
        if host.take_layout_dirty() {
            chart.measure(240.0, 240.0, Padding::all(12.0))?;
        }
        if host.take_dirty() {
            chart.draw(&mut LogCanvas { label })?;
            frames += 1;
        }
        if !changed && !chart.state().is_animating() {
            return Ok(frames);
        }
    }
}

fn main() -> Result<(), ChartError> {
    init_tracing();

    let args = PercentageChartArgs::from_json(CONFIG)?;
    let ring_host = Arc::new(HeadlessHost::default());
    let mut ring = PercentageChart::from_args(ChartMode::Ring, args, ring_host.clone());
    ring.measure(240.0, 240.0, Padding::all(12.0))?;
    ring.state_mut()
        .set_text_formatter(Some(TextFormatter::new(|value| format!("{value}%"))));

    let completed = Arc::new(Mutex::new(Vec::new()));
    for target in [35.0, 80.0, 100.0] {
        let sink = completed.clone();
        ring.state_mut().set_progress_with(
            target,
            true,
            Some(Box::new(move || sink.lock().push(target))),
        );
        let frames = run_until_idle(&mut ring, &ring_host, "ring")?;
        info!(progress = target, frames, text = %ring.state().text(), "ring settled");
    }
    info!(completed = ?completed.lock(), "completed progress changes");

    let pie_host = Arc::new(HeadlessHost::default());
    let mut pie = PercentageChart::new(ChartMode::Ring, pie_host.clone());
    ring.mirror_into(&mut pie);
    pie.set_mode(ChartMode::Pie);
    pie.state_mut().set_easing(EasingCurve::Bounce);
    pie.state_mut().set_adaptive_text(0.7, AdaptiveMode::Lighter);
    pie.state_mut()
        .set_adaptive_color_provider(Some(Arc::new(|progress: f32| {
            let warm = (progress / 100.0 * 255.0) as u8;
            Color::from_rgb(warm, 255 - warm, 64)
        })));
    pie.state_mut().set_progress(20.0, true);
    let frames = run_until_idle(&mut pie, &pie_host, "pie")?;
    info!(
        frames,
        text = %pie.state().text(),
        color = %format!("{:#010x}", pie.state().progress_color().to_argb()),
        "pie settled"
    );

    pie.destroy();
    ring.destroy();
    Ok(())
}
