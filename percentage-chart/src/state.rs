//! Renderer state: the single source of truth of one chart.
//!
//! ## Usage
//!
//! Build a [`RendererState`] from defaults or from a [`PercentageChartArgs`]
//! snapshot, mutate it only through its setters and advance it with
//! [`RendererState::tick`] on every frame while [`RendererState::is_animating`]
//! reports `true`. Every setter sends a redraw signal to the host; setters
//! that change the geometry also request a layout pass.

use std::{fmt, sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::{
    AdaptiveMode, ChartMode, Color, EasingCurve, Orientation, PercentageChartArgs,
    adaptive::{AdaptiveColor, AdaptiveColorProvider, is_valid_ratio},
    animation::{AnimationController, CompletionCallback},
    config::{DEFAULT_PROGRESS_BAR_THICKNESS_DP, DEFAULT_START_ANGLE},
    geometry::ChartBounds,
    host::{ArcCap, ChartHost},
    text::{
        DEFAULT_TEXT_SIZE_SP, TextFormatter, TextMetrics, TextPaint, TextShadow, TextStyle,
        Typeface,
    },
    theme,
};

/// Upper bound of the progress value.
pub const MAX_PROGRESS: f32 = 100.0;

/// Callback notified with the current progress whenever it changes.
#[derive(Clone)]
pub struct ProgressListener(Arc<dyn Fn(f32) + Send + Sync>);

impl ProgressListener {
    /// Wraps `f` as a listener.
    pub fn new(f: impl Fn(f32) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for ProgressListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgressListener(..)")
    }
}

impl PartialEq for ProgressListener {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, MAX_PROGRESS)
    }
}

fn valid_start_angle(angle: f32) -> f32 {
    if (0.0..=360.0).contains(&angle) {
        angle
    } else {
        warn!(angle, "start angle outside 0..=360, using default");
        DEFAULT_START_ANGLE
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn fire(callback: Option<CompletionCallback>) {
    if let Some(callback) = callback {
        callback();
    }
}

/// Styling, progress and animation state of one chart.
pub struct RendererState {
    host: Arc<dyn ChartHost>,
    detached: bool,

    progress: f32,
    displayed_progress: i32,
    sweep_angle: f32,
    start_angle: f32,
    orientation: Orientation,

    draw_background: bool,
    background_color: Color,
    background_offset: f32,
    adaptive_background: AdaptiveColor,
    adaptive_background_color: Color,

    progress_color: Color,
    adaptive_color: Color,
    progress_bar_thickness: f32,
    progress_bar_cap: ArcCap,

    text_color: Color,
    text_size: f32,
    typeface: Typeface,
    text_style: TextStyle,
    text_shadow: TextShadow,
    text_formatter: Option<TextFormatter>,
    text: String,
    text_metrics: TextMetrics,
    adaptive_text: AdaptiveColor,
    adaptive_text_color: Color,

    animation_duration: Duration,
    easing: EasingCurve,
    animations: AnimationController,

    provider: Option<Arc<dyn AdaptiveColorProvider>>,
    progress_listener: Option<ProgressListener>,
    bounds: Option<ChartBounds>,
}

impl RendererState {
    /// Creates a state with plain defaults: red progress, white 12sp label,
    /// background drawn only where `mode` draws it by default.
    pub fn new(mode: ChartMode, host: Arc<dyn ChartHost>) -> Self {
        let args = PercentageChartArgs {
            progress_color: Some(Color::RED),
            ..Default::default()
        };
        Self::from_args(mode, args, host)
    }

    /// Creates a state from a configuration snapshot, clamping and defaulting
    /// invalid values.
    pub fn from_args(mode: ChartMode, args: PercentageChartArgs, host: Arc<dyn ChartHost>) -> Self {
        let scale = host.scale_factor();
        let progress = clamp_progress(args.progress);
        let progress_color = args
            .progress_color
            .or_else(|| host.theme_accent_color())
            .unwrap_or_else(theme::default_accent_color);
        let text_shadow = if args.text_shadow.is_visible() {
            args.text_shadow
        } else {
            TextShadow::default()
        };
        let animation_duration = Duration::from_millis(args.animation_duration_ms);

        let mut state = Self {
            host,
            detached: false,

            progress,
            displayed_progress: progress.round() as i32,
            sweep_angle: progress / MAX_PROGRESS * 360.0,
            start_angle: valid_start_angle(args.start_angle),
            orientation: args.orientation,

            draw_background: args
                .draw_background
                .unwrap_or_else(|| mode.geometry().draws_background_by_default()),
            background_color: args.background_color,
            background_offset: non_negative(args.background_offset),
            adaptive_background: AdaptiveColor {
                enabled: args.adaptive_background,
                ..AdaptiveColor::new(args.adaptive_background_ratio, args.adaptive_background_mode)
            },
            adaptive_background_color: args.background_color,

            progress_color,
            adaptive_color: progress_color,
            progress_bar_thickness: non_negative(
                args.progress_bar_thickness
                    .unwrap_or(DEFAULT_PROGRESS_BAR_THICKNESS_DP * scale),
            ),
            progress_bar_cap: args.progress_bar_cap,

            text_color: args.text_color,
            text_size: args
                .text_size
                .filter(|size| size.is_finite() && *size > 0.0)
                .unwrap_or(DEFAULT_TEXT_SIZE_SP * scale),
            typeface: Typeface {
                family: args.typeface,
                style: TextStyle::Normal,
            },
            text_style: args.text_style,
            text_shadow,
            text_formatter: None,
            text: String::new(),
            text_metrics: TextMetrics::default(),
            adaptive_text: AdaptiveColor {
                enabled: args.adaptive_text,
                ..AdaptiveColor::new(args.adaptive_text_ratio, args.adaptive_text_mode)
            },
            adaptive_text_color: args.text_color,

            animations: AnimationController::new(
                progress,
                progress_color,
                animation_duration,
                args.easing.clone(),
            ),
            animation_duration,
            easing: args.easing,

            provider: None,
            progress_listener: None,
            bounds: None,
        };
        state.refresh_adaptive_colors();
        state.update_text();
        state
    }

    pub(crate) fn invalidate(&self) {
        if !self.detached {
            self.host.invalidate();
        }
    }

    pub(crate) fn request_layout(&self) {
        if !self.detached {
            self.host.request_layout();
        }
    }

    /// Re-derives the label from the displayed progress and re-measures it.
    fn update_text(&mut self) {
        self.text = match &self.text_formatter {
            Some(formatter) => formatter.format(self.displayed_progress),
            None => self.displayed_progress.to_string(),
        };
        self.text_metrics = self.host.measure_text(&self.text, &self.text_paint());
    }

    fn apply_progress(&mut self, progress: f32) {
        self.progress = clamp_progress(progress);
        self.displayed_progress = self.progress.round() as i32;
        self.sweep_angle = self.progress / MAX_PROGRESS * 360.0;
        self.update_text();
        if let Some(listener) = &self.progress_listener {
            (listener.0)(self.progress);
        }
    }

    fn refresh_adaptive_colors(&mut self) {
        let base = self.progress_color();
        if self.adaptive_background.enabled && self.draw_background {
            self.adaptive_background_color = self
                .provider
                .as_ref()
                .and_then(|provider| provider.provide_background_color(self.progress))
                .unwrap_or_else(|| self.adaptive_background.apply(base));
        }
        if self.adaptive_text.enabled {
            self.adaptive_text_color = self
                .provider
                .as_ref()
                .and_then(|provider| provider.provide_text_color(self.progress))
                .unwrap_or_else(|| self.adaptive_text.apply(base));
        }
    }

    // ---------------------------------------------------------------- progress

    /// Current (animated) progress in `0.0..=100.0`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The integer shown in the label: the rounded animated progress.
    pub fn displayed_progress(&self) -> i32 {
        self.displayed_progress
    }

    /// The label as drawn.
    pub fn text(&self) -> String {
        self.text.clone()
    }

    /// Metrics of the label from the last measurement.
    pub fn text_metrics(&self) -> TextMetrics {
        self.text_metrics
    }

    /// Arc or wedge extent in degrees, always `progress / 100 * 360`.
    pub fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    /// Moves progress to `target`, animated or at once.
    pub fn set_progress(&mut self, target: f32, animate: bool) {
        self.set_progress_with(target, animate, None);
    }

    /// Moves progress to `target` and fires `on_complete` when it gets there.
    ///
    /// Starting a new progress change cancels the one in flight; the canceled
    /// change never fires its callback.
    pub fn set_progress_with(
        &mut self,
        target: f32,
        animate: bool,
        on_complete: Option<CompletionCallback>,
    ) {
        if self.detached {
            debug!(progress = target, "ignoring progress change on a destroyed chart");
            return;
        }
        let target = clamp_progress(target);
        let provided = self
            .provider
            .as_ref()
            .map(|p| (p.provide_progress_color(self.progress), p.provide_progress_color(target)));

        let completed = if animate {
            if let Some((from_color, to_color)) = provided {
                let _ = self.animations.color.start(from_color, to_color, None);
            }
            self.animations.progress.start(self.progress, target, on_complete)
        } else {
            if let Some((_, to_color)) = provided {
                let _ = self.animations.color.jump_to(to_color, None);
            }
            self.animations.progress.jump_to(target, on_complete)
        };

        if !self.animations.progress.is_running() {
            if let Some((_, to_color)) = provided {
                self.adaptive_color = to_color;
            }
            self.apply_progress(target);
            self.refresh_adaptive_colors();
        }
        self.invalidate();
        fire(completed);
    }

    /// Advances the animations by `dt`. Returns whether anything changed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.detached {
            return false;
        }
        let progress_frame = self.animations.progress.tick(dt);
        let color_frame = self.animations.color.tick(dt);
        if progress_frame.value.is_none() && color_frame.value.is_none() {
            return false;
        }

        if let Some(color) = color_frame.value {
            if self.provider.is_some() {
                self.adaptive_color = color;
            } else {
                self.progress_color = color;
            }
        }
        if let Some(progress) = progress_frame.value {
            self.apply_progress(progress);
            if color_frame.value.is_none()
                && let Some(provider) = &self.provider
            {
                self.adaptive_color = provider.provide_progress_color(self.progress);
            }
        }
        self.refresh_adaptive_colors();
        self.invalidate();

        fire(progress_frame.completed);
        fire(color_frame.completed);
        true
    }

    /// Whether the host should keep scheduling ticks.
    pub fn is_animating(&self) -> bool {
        !self.detached && self.animations.is_running()
    }

    /// The shared animators.
    pub fn animations(&self) -> &AnimationController {
        &self.animations
    }

    /// Sets the callback notified on every progress change.
    pub fn set_progress_listener(&mut self, listener: Option<ProgressListener>) {
        self.progress_listener = listener;
    }

    // ---------------------------------------------------------------- angles

    /// Start angle in degrees.
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Sets the start angle; values outside `0.0..=360.0` reset it to 0.
    pub fn set_start_angle(&mut self, angle: f32) {
        self.start_angle = valid_start_angle(angle);
        self.invalidate();
    }

    /// Sweep direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets the sweep direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.invalidate();
    }

    // ---------------------------------------------------------------- background

    /// Whether the background is drawn.
    pub fn is_draw_background_enabled(&self) -> bool {
        self.draw_background
    }

    /// Shows or hides the background.
    pub fn set_draw_background(&mut self, draw_background: bool) {
        self.draw_background = draw_background;
        self.refresh_adaptive_colors();
        self.invalidate();
        self.request_layout();
    }

    /// Effective background color; `None` while the background is hidden.
    pub fn background_color(&self) -> Option<Color> {
        if !self.draw_background {
            None
        } else if self.adaptive_background.enabled {
            Some(self.adaptive_background_color)
        } else {
            Some(self.background_color)
        }
    }

    /// Sets the background color. Ignored while a color provider is active.
    pub fn set_background_color(&mut self, color: Color) {
        if self.provider.is_some() {
            debug!("background color is owned by the adaptive color provider");
            return;
        }
        self.background_color = color;
        if !self.draw_background {
            return;
        }
        self.invalidate();
    }

    /// Background inset in pixels; `None` while the background is hidden.
    pub fn background_offset(&self) -> Option<f32> {
        self.draw_background.then_some(self.background_offset)
    }

    /// Sets the background inset. Ignored while the background is hidden.
    pub fn set_background_offset(&mut self, offset: f32) {
        if !self.draw_background {
            return;
        }
        self.background_offset = non_negative(offset);
        self.invalidate();
        self.request_layout();
    }

    /// Whether the background color is derived from the progress color.
    pub fn is_adaptive_background_enabled(&self) -> bool {
        self.adaptive_background.enabled
    }

    /// Ratio of the derived background color, `None` when unset.
    pub fn adaptive_background_ratio(&self) -> Option<f32> {
        self.adaptive_background.ratio
    }

    /// Mode of the derived background color, `None` when unset.
    pub fn adaptive_background_mode(&self) -> Option<AdaptiveMode> {
        self.adaptive_background.mode
    }

    /// Enables or disables the derived background color.
    pub fn set_adaptive_background_enabled(&mut self, enabled: bool) {
        self.adaptive_background.enabled = enabled;
        self.refresh_adaptive_colors();
        self.invalidate();
    }

    /// Enables the derived background color with `ratio` and `mode`.
    pub fn set_adaptive_background(&mut self, ratio: f32, mode: AdaptiveMode) {
        if !is_valid_ratio(ratio) {
            warn!(ratio, "adaptive background ratio outside 0..=1, treated as unset");
        }
        self.adaptive_background = AdaptiveColor::new(ratio, Some(mode));
        self.refresh_adaptive_colors();
        self.invalidate();
    }

    // ---------------------------------------------------------------- progress paint

    /// Effective progress color: the provider's color while one is active.
    pub fn progress_color(&self) -> Color {
        if self.provider.is_some() {
            self.adaptive_color
        } else {
            self.progress_color
        }
    }

    /// Sets the progress color at once. Ignored while a color provider is
    /// active.
    pub fn set_progress_color(&mut self, color: Color) {
        if self.provider.is_some() {
            debug!("progress color is owned by the adaptive color provider");
            return;
        }
        self.animations.color.cancel();
        self.progress_color = color;
        self.refresh_adaptive_colors();
        self.invalidate();
    }

    /// Transitions the progress color to `color` with the color animator.
    /// Ignored while a color provider is active.
    pub fn animate_progress_color(&mut self, color: Color, on_complete: Option<CompletionCallback>) {
        if self.provider.is_some() || self.detached {
            debug!("progress color animation ignored");
            return;
        }
        let completed = self.animations.color.start(self.progress_color, color, on_complete);
        if !self.animations.color.is_running() {
            self.progress_color = color;
            self.refresh_adaptive_colors();
        }
        self.invalidate();
        fire(completed);
    }

    /// Whether an adaptive color provider is installed.
    pub fn has_adaptive_color_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Installs or removes the adaptive color provider.
    pub fn set_adaptive_color_provider(&mut self, provider: Option<Arc<dyn AdaptiveColorProvider>>) {
        match provider {
            Some(provider) => {
                self.adaptive_color = provider.provide_progress_color(self.progress);
                let _ = self.animations.color.jump_to(self.adaptive_color, None);
                self.provider = Some(provider);
            }
            None => {
                self.animations.color.cancel();
                self.provider = None;
            }
        }
        self.refresh_adaptive_colors();
        self.invalidate();
    }

    /// Ring stroke width in pixels.
    pub fn progress_bar_thickness(&self) -> f32 {
        self.progress_bar_thickness
    }

    /// Sets the ring stroke width.
    pub fn set_progress_bar_thickness(&mut self, thickness: f32) {
        self.progress_bar_thickness = non_negative(thickness);
        self.invalidate();
        self.request_layout();
    }

    /// Ring stroke cap.
    pub fn progress_bar_cap(&self) -> ArcCap {
        self.progress_bar_cap
    }

    /// Sets the ring stroke cap.
    pub fn set_progress_bar_cap(&mut self, cap: ArcCap) {
        self.progress_bar_cap = cap;
        self.invalidate();
    }

    // ---------------------------------------------------------------- animation

    /// Duration of progress and color animations.
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Sets the duration of both animators.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
        self.animations.set_duration(duration);
        self.invalidate();
    }

    /// Easing curve of progress and color animations.
    pub fn easing(&self) -> EasingCurve {
        self.easing.clone()
    }

    /// Sets the easing curve of both animators.
    pub fn set_easing(&mut self, easing: EasingCurve) {
        self.animations.set_easing(easing.clone());
        self.easing = easing;
        self.invalidate();
    }

    // ---------------------------------------------------------------- text

    /// Effective label color: the derived color while adaptive text is on.
    pub fn text_color(&self) -> Color {
        if self.adaptive_text.enabled {
            self.adaptive_text_color
        } else {
            self.text_color
        }
    }

    /// Sets the label color. Ignored while a color provider is active.
    pub fn set_text_color(&mut self, color: Color) {
        if self.provider.is_some() {
            debug!("text color is owned by the adaptive color provider");
            return;
        }
        self.text_color = color;
        self.invalidate();
    }

    /// Label size in pixels.
    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Sets the label size; non-positive sizes are ignored.
    pub fn set_text_size(&mut self, size: f32) {
        if !(size.is_finite() && size > 0.0) {
            warn!(size, "ignoring invalid text size");
            return;
        }
        self.text_size = size;
        self.update_text();
        self.invalidate();
    }

    /// Effective typeface: the family with the current text style applied.
    pub fn typeface(&self) -> Typeface {
        if self.text_style == TextStyle::Normal {
            self.typeface.clone()
        } else {
            self.typeface.clone().with_style(self.text_style)
        }
    }

    /// Sets the label typeface; the current text style stays applied.
    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = typeface;
        self.update_text();
        self.invalidate();
    }

    /// Label style.
    pub fn text_style(&self) -> TextStyle {
        self.text_style
    }

    /// Sets the label style.
    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
        self.update_text();
        self.invalidate();
    }

    /// Label shadow.
    pub fn text_shadow(&self) -> TextShadow {
        self.text_shadow
    }

    /// Sets the label shadow.
    pub fn set_text_shadow(&mut self, color: Color, radius: f32, dx: f32, dy: f32) {
        self.text_shadow = TextShadow {
            color,
            radius: non_negative(radius),
            dx,
            dy,
        };
        self.update_text();
        self.invalidate();
    }

    /// Replaces the label formatter; `None` prints the plain integer.
    pub fn set_text_formatter(&mut self, formatter: Option<TextFormatter>) {
        self.text_formatter = formatter;
        self.update_text();
        self.invalidate();
    }

    /// Whether the label color is derived from the progress color.
    pub fn is_adaptive_text_enabled(&self) -> bool {
        self.adaptive_text.enabled
    }

    /// Ratio of the derived label color, `None` when unset.
    pub fn adaptive_text_ratio(&self) -> Option<f32> {
        self.adaptive_text.ratio
    }

    /// Mode of the derived label color, `None` when unset.
    pub fn adaptive_text_mode(&self) -> Option<AdaptiveMode> {
        self.adaptive_text.mode
    }

    /// Enables or disables the derived label color.
    pub fn set_adaptive_text_enabled(&mut self, enabled: bool) {
        self.adaptive_text.enabled = enabled;
        self.refresh_adaptive_colors();
        self.invalidate();
    }

    /// Enables the derived label color with `ratio` and `mode`.
    pub fn set_adaptive_text(&mut self, ratio: f32, mode: AdaptiveMode) {
        if !is_valid_ratio(ratio) {
            warn!(ratio, "adaptive text ratio outside 0..=1, treated as unset");
        }
        self.adaptive_text = AdaptiveColor::new(ratio, Some(mode));
        self.refresh_adaptive_colors();
        self.invalidate();
    }

    /// Paint for measuring and drawing the label.
    pub fn text_paint(&self) -> TextPaint {
        TextPaint {
            size: self.text_size,
            color: self.text_color(),
            typeface: self.typeface(),
            shadow: self.text_shadow.is_visible().then_some(self.text_shadow),
        }
    }

    // ---------------------------------------------------------------- lifecycle

    /// Bounds from the last layout pass.
    pub fn bounds(&self) -> Option<ChartBounds> {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: ChartBounds) {
        self.bounds = Some(bounds);
    }

    /// Whether [`RendererState::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.detached
    }

    /// Cancels both animations and stops signalling the host.
    pub fn destroy(&mut self) {
        self.animations.cancel_all();
        self.detached = true;
        debug!("renderer state destroyed");
    }

    /// Copies every field into `target`.
    ///
    /// Animators are shared, so `target` continues the animation in flight.
    /// `target` keeps its own host connection.
    pub fn mirror(&self, target: &mut RendererState) {
        let RendererState {
            host: _,
            detached: _,
            progress,
            displayed_progress,
            sweep_angle,
            start_angle,
            orientation,
            draw_background,
            background_color,
            background_offset,
            adaptive_background,
            adaptive_background_color,
            progress_color,
            adaptive_color,
            progress_bar_thickness,
            progress_bar_cap,
            text_color,
            text_size,
            typeface,
            text_style,
            text_shadow,
            text_formatter,
            text,
            text_metrics,
            adaptive_text,
            adaptive_text_color,
            animation_duration,
            easing,
            animations,
            provider,
            progress_listener,
            bounds,
        } = self;

        target.progress = *progress;
        target.displayed_progress = *displayed_progress;
        target.sweep_angle = *sweep_angle;
        target.start_angle = *start_angle;
        target.orientation = *orientation;
        target.draw_background = *draw_background;
        target.background_color = *background_color;
        target.background_offset = *background_offset;
        target.adaptive_background = *adaptive_background;
        target.adaptive_background_color = *adaptive_background_color;
        target.progress_color = *progress_color;
        target.adaptive_color = *adaptive_color;
        target.progress_bar_thickness = *progress_bar_thickness;
        target.progress_bar_cap = *progress_bar_cap;
        target.text_color = *text_color;
        target.text_size = *text_size;
        target.typeface = typeface.clone();
        target.text_style = *text_style;
        target.text_shadow = *text_shadow;
        target.text_formatter = text_formatter.clone();
        target.text = text.clone();
        target.text_metrics = *text_metrics;
        target.adaptive_text = *adaptive_text;
        target.adaptive_text_color = *adaptive_text_color;
        target.animation_duration = *animation_duration;
        target.easing = easing.clone();
        target.animations = animations.clone();
        target.provider = provider.clone();
        target.progress_listener = progress_listener.clone();
        target.bounds = *bounds;
    }
}

impl PartialEq for RendererState {
    fn eq(&self, other: &Self) -> bool {
        let same_provider = match (&self.provider, &other.provider) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_provider
            && self.progress == other.progress
            && self.displayed_progress == other.displayed_progress
            && self.sweep_angle == other.sweep_angle
            && self.start_angle == other.start_angle
            && self.orientation == other.orientation
            && self.draw_background == other.draw_background
            && self.background_color == other.background_color
            && self.background_offset == other.background_offset
            && self.adaptive_background == other.adaptive_background
            && self.adaptive_background_color == other.adaptive_background_color
            && self.progress_color == other.progress_color
            && self.adaptive_color == other.adaptive_color
            && self.progress_bar_thickness == other.progress_bar_thickness
            && self.progress_bar_cap == other.progress_bar_cap
            && self.text_color == other.text_color
            && self.text_size == other.text_size
            && self.typeface == other.typeface
            && self.text_style == other.text_style
            && self.text_shadow == other.text_shadow
            && self.text_formatter == other.text_formatter
            && self.text == other.text
            && self.text_metrics == other.text_metrics
            && self.adaptive_text == other.adaptive_text
            && self.adaptive_text_color == other.adaptive_text_color
            && self.animation_duration == other.animation_duration
            && self.easing == other.easing
            && self.animations.ptr_eq(&other.animations)
            && self.progress_listener == other.progress_listener
            && self.bounds == other.bounds
    }
}

impl fmt::Debug for RendererState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererState")
            .field("progress", &self.progress)
            .field("text", &self.text)
            .field("sweep_angle", &self.sweep_angle)
            .field("start_angle", &self.start_angle)
            .field("orientation", &self.orientation)
            .field("draw_background", &self.draw_background)
            .field("progress_color", &self.progress_color())
            .field("background_color", &self.background_color())
            .field("text_color", &self.text_color())
            .field("animations", &self.animations)
            .field("has_provider", &self.provider.is_some())
            .field("detached", &self.detached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::testing::RecordingHost;

    const FRAME: Duration = Duration::from_millis(16);

    fn ring(host: &Arc<RecordingHost>) -> RendererState {
        RendererState::new(ChartMode::Ring, host.clone())
    }

    fn counter() -> (Arc<AtomicUsize>, CompletionCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (
            count,
            Box::new(move || {
                handle.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_immediate_progress() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        let (done, callback) = counter();
        state.set_progress_with(37.0, false, Some(callback));

        assert_eq!(state.progress(), 37.0);
        assert_eq!(state.text(), "37");
        assert!((state.sweep_angle() - 133.2).abs() < 1e-3);
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert!(!state.is_animating());
        assert!(!state.tick(FRAME));
        assert_eq!(host.invalidations(), 1);
    }

    #[test]
    fn test_progress_is_clamped() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_progress(140.0, false);
        assert_eq!(state.progress(), 100.0);
        assert_eq!(state.sweep_angle(), 360.0);
        state.set_progress(-5.0, false);
        assert_eq!(state.progress(), 0.0);
        state.set_progress(f32::NAN, false);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_animated_progress_tracks_ticks() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_animation_duration(Duration::from_millis(100));
        let (done, callback) = counter();
        state.set_progress_with(80.0, true, Some(callback));
        assert_eq!(state.progress(), 0.0);
        assert!(state.is_animating());

        let mut elapsed = Duration::ZERO;
        let mut shown = Vec::new();
        while state.tick(FRAME) {
            elapsed += FRAME;
            assert!((state.sweep_angle() - state.progress() / 100.0 * 360.0).abs() < 1e-3);
            assert_eq!(state.displayed_progress(), state.progress().round() as i32);
            shown.push(state.displayed_progress());
            if done.load(Ordering::SeqCst) == 1 {
                break;
            }
        }
        assert!(elapsed >= Duration::from_millis(100));
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));
        assert!(shown.len() > 2 && shown[0] > 0 && shown[0] < 80);
        assert_eq!(*shown.last().expect("frames were shown"), 80);
        assert_eq!(state.text(), "80");

        while state.tick(FRAME) {}
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_animation_cancels_first() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_animation_duration(Duration::from_millis(100));
        let (first, first_cb) = counter();
        let (second, second_cb) = counter();
        state.set_progress_with(90.0, true, Some(first_cb));
        state.tick(FRAME);
        let midway = state.progress();
        state.set_progress_with(10.0, true, Some(second_cb));

        assert!(state.tick(FRAME));
        assert!(state.progress() < midway);
        for _ in 0..20 {
            state.tick(FRAME);
        }
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(state.progress(), 10.0);
    }

    #[test]
    fn test_start_angle_validation() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_start_angle(270.0);
        assert_eq!(state.start_angle(), 270.0);
        state.set_start_angle(400.0);
        assert_eq!(state.start_angle(), 0.0);
        state.set_start_angle(-1.0);
        assert_eq!(state.start_angle(), 0.0);
    }

    #[test]
    fn test_background_disabled_reports_unset() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        assert!(!state.is_draw_background_enabled());
        assert_eq!(state.background_color(), None);
        assert_eq!(state.background_offset(), None);

        let layouts = host.layout_requests();
        state.set_background_offset(12.0);
        assert_eq!(host.layout_requests(), layouts);

        state.set_draw_background(true);
        assert_eq!(state.background_color(), Some(Color::BLACK));
        assert_eq!(state.background_offset(), Some(0.0));
        state.set_background_offset(12.0);
        assert_eq!(state.background_offset(), Some(12.0));
        assert_eq!(host.layout_requests(), layouts + 2);
    }

    #[test]
    fn test_adaptive_background_derives_from_progress_color() {
        let host = RecordingHost::new();
        let mut state = RendererState::new(ChartMode::Pie, host.clone());
        state.set_progress_color(Color::from_argb(0xFF80_4020));
        state.set_adaptive_background(0.5, AdaptiveMode::Darker);
        assert_eq!(state.background_color(), Some(Color::from_argb(0xFF40_2010)));
        assert_eq!(state.adaptive_background_ratio(), Some(0.5));
        assert_eq!(state.adaptive_background_mode(), Some(AdaptiveMode::Darker));

        state.set_adaptive_background(3.0, AdaptiveMode::Lighter);
        assert_eq!(state.adaptive_background_ratio(), None);
        assert_eq!(state.background_color(), Some(Color::from_argb(0xFF80_4020)));

        state.set_adaptive_background_enabled(false);
        assert_eq!(state.background_color(), Some(Color::BLACK));
    }

    #[test]
    fn test_adaptive_text() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_progress_color(Color::from_rgb(100, 100, 100));
        state.set_adaptive_text(0.5, AdaptiveMode::Lighter);
        assert!(state.is_adaptive_text_enabled());
        assert_eq!(state.text_color(), Color::from_rgb(178, 178, 178));
        assert_eq!(state.text_paint().color, Color::from_rgb(178, 178, 178));
        state.set_adaptive_text_enabled(false);
        assert_eq!(state.text_color(), Color::WHITE);
    }

    #[test]
    fn test_provider_guards_color_setters() {
        let host = RecordingHost::new();
        let mut state = RendererState::new(ChartMode::Pie, host.clone());
        let provider: Arc<dyn AdaptiveColorProvider> =
            Arc::new(|progress: f32| Color::from_rgb(progress as u8, 0, 0));
        state.set_adaptive_color_provider(Some(provider));
        assert!(state.has_adaptive_color_provider());

        let progress_color = state.progress_color();
        let background = state.background_color();
        let text = state.text_color();
        let before = host.invalidations();
        state.set_progress_color(Color::WHITE);
        state.set_background_color(Color::WHITE);
        state.set_text_color(Color::BLACK);
        assert_eq!(state.progress_color(), progress_color);
        assert_eq!(state.background_color(), background);
        assert_eq!(state.text_color(), text);
        assert_eq!(host.invalidations(), before);

        state.set_progress(42.0, false);
        assert_eq!(state.progress_color(), Color::from_rgb(42, 0, 0));

        state.set_adaptive_color_provider(None);
        state.set_progress_color(Color::WHITE);
        assert_eq!(state.progress_color(), Color::WHITE);
    }

    #[test]
    fn test_provider_colors_animate_with_progress() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_animation_duration(Duration::from_millis(64));
        let provider: Arc<dyn AdaptiveColorProvider> =
            Arc::new(|progress: f32| Color::from_rgb((progress * 255.0 / 100.0) as u8, 0, 0));
        state.set_adaptive_color_provider(Some(provider));
        state.set_adaptive_background(0.5, AdaptiveMode::Darker);
        state.set_draw_background(true);
        state.set_progress(100.0, true);

        state.tick(FRAME);
        let mid = state.progress_color();
        assert!(mid.r > 0 && mid.r < 255);
        while state.tick(FRAME) {}
        assert_eq!(state.progress_color(), Color::from_rgb(255, 0, 0));
        assert_eq!(state.background_color(), Some(Color::from_rgb(128, 0, 0)));
    }

    #[test]
    fn test_animate_progress_color() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_animation_duration(Duration::from_millis(32));
        let (done, callback) = counter();
        state.animate_progress_color(Color::BLACK, Some(callback));
        assert!(state.is_animating());
        while state.tick(FRAME) {}
        assert_eq!(state.progress_color(), Color::BLACK);
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mirror_copies_every_field() {
        let host = RecordingHost::new();
        let mut source = ring(&host);
        source.set_progress(55.0, false);
        source.set_start_angle(90.0);
        source.set_orientation(Orientation::CounterClockwise);
        source.set_draw_background(true);
        source.set_background_offset(4.0);
        source.set_text_size(30.0);
        source.set_text_style(TextStyle::Bold);
        source.set_typeface(Typeface::new("mono"));
        source.set_text_shadow(Color::BLACK, 2.0, 1.0, 1.0);
        source.set_adaptive_text(0.3, AdaptiveMode::Darker);
        source.set_easing(EasingCurve::Bounce);
        source.set_progress_listener(Some(ProgressListener::new(|_| {})));
        source.set_text_formatter(Some(TextFormatter::new(|v| format!("{v}%"))));

        let mut target = RendererState::new(ChartMode::Pie, host.clone());
        assert_ne!(source, target);
        source.mirror(&mut target);
        assert_eq!(source, target);
        assert_eq!(target.text(), "55%");
        assert!(target.animations().ptr_eq(source.animations()));
        assert_eq!(target.typeface(), Typeface::new("mono").with_style(TextStyle::Bold));
    }

    #[test]
    fn test_mirror_continues_animation() {
        let host = RecordingHost::new();
        let mut source = ring(&host);
        source.set_animation_duration(Duration::from_millis(100));
        source.set_progress(100.0, true);
        source.tick(FRAME);

        let mut target = RendererState::new(ChartMode::Pie, host.clone());
        source.mirror(&mut target);
        let before = target.progress();
        assert!(target.is_animating());
        assert!(target.tick(FRAME));
        assert!(target.progress() > before);

        target.set_animation_duration(Duration::from_millis(40));
        assert_eq!(source.animations().progress.duration(), Duration::from_millis(40));
    }

    #[test]
    fn test_destroy_cancels_and_detaches() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        let (done, callback) = counter();
        state.set_progress_with(70.0, true, Some(callback));
        let before = host.invalidations();
        state.destroy();

        assert!(state.is_destroyed());
        assert!(!state.is_animating());
        assert!(!state.tick(FRAME));
        state.set_text_size(40.0);
        state.set_progress(20.0, false);
        assert_eq!(host.invalidations(), before);
        assert_eq!(done.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_each_animation_frame_invalidates() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        state.set_animation_duration(Duration::from_millis(64));
        state.set_progress(100.0, true);

        let mut frames = 0;
        loop {
            let before = host.invalidations();
            let changed = state.tick(FRAME);
            if !changed {
                assert_eq!(host.invalidations(), before);
                break;
            }
            assert_eq!(host.invalidations(), before + 1);
            frames += 1;
        }
        assert_eq!(frames, 4);

        let idle = host.invalidations();
        assert!(!state.tick(FRAME));
        assert_eq!(host.invalidations(), idle);
    }

    #[derive(Default)]
    struct CountingProvider {
        background_calls: AtomicUsize,
    }

    impl AdaptiveColorProvider for CountingProvider {
        fn provide_progress_color(&self, _progress: f32) -> Color {
            Color::from_rgb(200, 0, 0)
        }

        fn provide_background_color(&self, _progress: f32) -> Option<Color> {
            self.background_calls.fetch_add(1, Ordering::SeqCst);
            Some(Color::from_rgb(10, 20, 30))
        }
    }

    #[test]
    fn test_hidden_background_is_never_adapted() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        let provider = Arc::new(CountingProvider::default());
        let shared: Arc<dyn AdaptiveColorProvider> = provider.clone();
        state.set_adaptive_color_provider(Some(shared));
        state.set_adaptive_background(0.5, AdaptiveMode::Darker);
        state.set_animation_duration(Duration::from_millis(32));
        state.set_progress(60.0, true);
        while state.tick(FRAME) {}

        assert_eq!(provider.background_calls.load(Ordering::SeqCst), 0);
        assert_eq!(state.background_color(), None);

        state.set_draw_background(true);
        assert!(provider.background_calls.load(Ordering::SeqCst) > 0);
        assert_eq!(state.background_color(), Some(Color::from_rgb(10, 20, 30)));
    }

    #[test]
    fn test_setters_signal_host() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        assert_eq!(host.invalidations(), 0);
        assert_eq!(host.layout_requests(), 0);

        state.set_orientation(Orientation::CounterClockwise);
        state.set_text_color(Color::BLACK);
        state.set_progress_bar_cap(ArcCap::Butt);
        assert_eq!(host.invalidations(), 3);
        assert_eq!(host.layout_requests(), 0);

        state.set_progress_bar_thickness(8.0);
        assert_eq!(host.invalidations(), 4);
        assert_eq!(host.layout_requests(), 1);
    }

    #[test]
    fn test_text_is_remeasured() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        let initial = state.text_metrics();
        state.set_text_size(24.0);
        assert!(state.text_metrics().height > initial.height);
        state.set_progress(100.0, false);
        assert!(state.text_metrics().width > initial.width);
    }

    #[test]
    fn test_listener_sees_each_progress_change() {
        let host = RecordingHost::new();
        let mut state = ring(&host);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        state.set_progress_listener(Some(ProgressListener::new(move |p| sink.lock().push(p))));
        state.set_animation_duration(Duration::from_millis(32));
        state.set_progress(50.0, true);
        while state.tick(FRAME) {}
        assert_eq!(*seen.lock(), vec![25.0, 50.0]);
    }

    #[test]
    fn test_from_args_validates_snapshot() {
        let host = RecordingHost::with(Some(Color::from_rgb(1, 2, 3)), 2.0);
        let args = PercentageChartArgs {
            progress: 250.0,
            start_angle: 720.0,
            text_shadow: TextShadow {
                color: Color::TRANSPARENT,
                radius: 5.0,
                dx: 3.0,
                dy: 3.0,
            },
            adaptive_background: true,
            adaptive_background_ratio: 0.25,
            adaptive_background_mode: AdaptiveMode::from_index(1),
            easing: EasingCurve::from_index(42),
            ..Default::default()
        };
        let state = RendererState::from_args(ChartMode::Pie, args, host.clone());
        assert_eq!(state.progress(), 100.0);
        assert_eq!(state.start_angle(), 0.0);
        assert_eq!(state.text_shadow(), TextShadow::default());
        assert_eq!(state.easing(), EasingCurve::Linear);
        assert_eq!(state.progress_color(), Color::from_rgb(1, 2, 3));
        assert!(state.is_draw_background_enabled());
        assert_eq!(state.adaptive_background_ratio(), Some(0.25));
        assert_eq!(state.animation_duration(), Duration::from_millis(400));
        assert_eq!(state.text_size(), DEFAULT_TEXT_SIZE_SP * 2.0);
    }
}
