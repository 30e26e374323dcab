//! Value animators driven by the host frame clock.
//!
//! ## Usage
//!
//! The host calls [`Animator::tick`] once per frame with the time elapsed
//! since the previous frame. Animators are shared handles: cloning one (as
//! [`crate::RendererState::mirror`] does) keeps driving the same in-flight
//! animation instead of restarting it.

use std::{fmt, sync::Arc, time::Duration};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::{Color, EasingCurve};

/// Default animation duration.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(400);

/// Callback fired once when an animation completes. Never fired on cancel.
pub type CompletionCallback = Box<dyn FnOnce() + Send + Sync>;

/// Values that can be animated.
pub trait Interpolate: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Interpolates between `from` and `to`. `fraction` may leave `[0, 1]`.
    fn interpolate(from: Self, to: Self, fraction: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(from: Self, to: Self, fraction: f32) -> Self {
        from + (to - from) * fraction
    }
}

impl Interpolate for Color {
    fn interpolate(from: Self, to: Self, fraction: f32) -> Self {
        Color::lerp(from, to, fraction)
    }
}

/// Lifecycle of a single animatable quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationPhase<T> {
    /// Nothing scheduled.
    Idle,
    /// Interpolating from `from` to `to`.
    Running {
        /// Start value.
        from: T,
        /// Target value.
        to: T,
        /// Time elapsed since the start.
        elapsed: Duration,
    },
    /// Reached the target during the last frame.
    Completed,
    /// Replaced or stopped before reaching the target.
    Canceled,
}

/// Result of advancing an animator by one frame.
pub struct AnimationFrame<T> {
    /// The new value, `None` when the animator did not run this frame.
    pub value: Option<T>,
    /// Completion callback to fire once the frame has been applied.
    pub completed: Option<CompletionCallback>,
}

impl<T> AnimationFrame<T> {
    fn idle() -> Self {
        Self {
            value: None,
            completed: None,
        }
    }
}

/// State machine interpolating one value over time.
pub struct ValueAnimator<T: Interpolate> {
    phase: AnimationPhase<T>,
    value: T,
    duration: Duration,
    easing: EasingCurve,
    on_complete: Option<CompletionCallback>,
}

impl<T: Interpolate> ValueAnimator<T> {
    /// Creates an idle animator resting at `value`.
    pub fn new(value: T, duration: Duration, easing: EasingCurve) -> Self {
        Self {
            phase: AnimationPhase::Idle,
            value,
            duration,
            easing,
            on_complete: None,
        }
    }

    fn cancel(&mut self) -> bool {
        if let AnimationPhase::Running { to, .. } = self.phase {
            debug!(value = ?self.value, target = ?to, "animation canceled");
            self.phase = AnimationPhase::Canceled;
            self.on_complete = None;
            true
        } else {
            false
        }
    }

    fn start(
        &mut self,
        from: T,
        to: T,
        on_complete: Option<CompletionCallback>,
    ) -> Option<CompletionCallback> {
        self.cancel();
        if self.duration.is_zero() {
            return self.jump_to(to, on_complete);
        }
        debug!(?from, ?to, duration_ms = self.duration.as_millis() as u64, "animation started");
        self.value = from;
        self.phase = AnimationPhase::Running {
            from,
            to,
            elapsed: Duration::ZERO,
        };
        self.on_complete = on_complete;
        None
    }

    fn jump_to(&mut self, value: T, on_complete: Option<CompletionCallback>) -> Option<CompletionCallback> {
        self.cancel();
        self.value = value;
        self.phase = AnimationPhase::Completed;
        self.on_complete = None;
        on_complete
    }

    fn advance(&mut self, dt: Duration) -> AnimationFrame<T> {
        match self.phase {
            AnimationPhase::Running { from, to, elapsed } => {
                let elapsed = elapsed.saturating_add(dt);
                if elapsed >= self.duration {
                    debug!(value = ?to, "animation completed");
                    self.value = to;
                    self.phase = AnimationPhase::Completed;
                    AnimationFrame {
                        value: Some(to),
                        completed: self.on_complete.take(),
                    }
                } else {
                    let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
                    self.value = T::interpolate(from, to, self.easing.transform(t));
                    self.phase = AnimationPhase::Running { from, to, elapsed };
                    AnimationFrame {
                        value: Some(self.value),
                        completed: None,
                    }
                }
            }
            AnimationPhase::Completed | AnimationPhase::Canceled => {
                self.phase = AnimationPhase::Idle;
                AnimationFrame::idle()
            }
            AnimationPhase::Idle => AnimationFrame::idle(),
        }
    }
}

/// Shared handle to a [`ValueAnimator`].
#[derive(Clone)]
pub struct Animator<T: Interpolate> {
    inner: Arc<RwLock<ValueAnimator<T>>>,
}

impl<T: Interpolate> Animator<T> {
    /// Creates a new idle animator.
    pub fn new(value: T, duration: Duration, easing: EasingCurve) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ValueAnimator::new(value, duration, easing))),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ValueAnimator<T>> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, ValueAnimator<T>> {
        self.inner.write()
    }

    /// Cancels any running animation and starts a new one.
    ///
    /// Returns the completion callback when the animation completed
    /// immediately (zero duration); the caller fires it.
    #[must_use = "an immediate completion callback must be fired by the caller"]
    pub fn start(
        &self,
        from: T,
        to: T,
        on_complete: Option<CompletionCallback>,
    ) -> Option<CompletionCallback> {
        self.write().start(from, to, on_complete)
    }

    /// Cancels any running animation and completes at `value` immediately.
    #[must_use = "the completion callback must be fired by the caller"]
    pub fn jump_to(&self, value: T, on_complete: Option<CompletionCallback>) -> Option<CompletionCallback> {
        self.write().jump_to(value, on_complete)
    }

    /// Stops a running animation without firing its completion callback.
    ///
    /// Returns `true` if an animation was running.
    pub fn cancel(&self) -> bool {
        self.write().cancel()
    }

    /// Advances the animator by `dt`.
    pub fn tick(&self, dt: Duration) -> AnimationFrame<T> {
        self.write().advance(dt)
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.read().value
    }

    /// Current phase.
    pub fn phase(&self) -> AnimationPhase<T> {
        self.read().phase
    }

    /// Whether an animation is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self.read().phase, AnimationPhase::Running { .. })
    }

    /// Configured duration.
    pub fn duration(&self) -> Duration {
        self.read().duration
    }

    /// Changes the duration, including for the animation in flight.
    pub fn set_duration(&self, duration: Duration) {
        self.write().duration = duration;
    }

    /// Configured easing curve.
    pub fn easing(&self) -> EasingCurve {
        self.read().easing.clone()
    }

    /// Changes the easing curve, including for the animation in flight.
    pub fn set_easing(&self, easing: EasingCurve) {
        self.write().easing = easing;
    }

    /// Whether both handles drive the same animator.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Interpolate> fmt::Debug for Animator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("Animator")
            .field("phase", &inner.phase)
            .field("value", &inner.value)
            .field("duration", &inner.duration)
            .field("easing", &inner.easing)
            .finish()
    }
}

/// The progress and color animators of one chart.
#[derive(Clone, Debug)]
pub struct AnimationController {
    /// Animates the progress value in `0.0..=100.0`.
    pub progress: Animator<f32>,
    /// Animates the progress color (provider colors or styling changes).
    pub color: Animator<Color>,
}

impl AnimationController {
    /// Creates idle animators sharing `duration` and `easing`.
    pub fn new(progress: f32, color: Color, duration: Duration, easing: EasingCurve) -> Self {
        Self {
            progress: Animator::new(progress, duration, easing.clone()),
            color: Animator::new(color, duration, easing),
        }
    }

    /// Applies a duration to both animators.
    pub fn set_duration(&self, duration: Duration) {
        self.progress.set_duration(duration);
        self.color.set_duration(duration);
    }

    /// Applies an easing curve to both animators.
    pub fn set_easing(&self, easing: EasingCurve) {
        self.progress.set_easing(easing.clone());
        self.color.set_easing(easing);
    }

    /// Whether either animator is in flight.
    pub fn is_running(&self) -> bool {
        self.progress.is_running() || self.color.is_running()
    }

    /// Stops both animators without firing completion callbacks.
    pub fn cancel_all(&self) {
        self.progress.cancel();
        self.color.cancel();
    }

    /// Whether both controllers share the same animators.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.progress.ptr_eq(&other.progress) && self.color.ptr_eq(&other.color)
    }
}
