//! Easing curves for progress and color animations.
//!
//! Each curve maps linear time `t` in `[0.0, 1.0]` to an eased fraction. The
//! built-in curves start at `0.0` and end at `1.0`; anticipating and
//! overshooting curves leave that range in between.

use std::{f32::consts::PI, fmt, sync::Arc};

use tracing::warn;

const ANTICIPATE_TENSION: f32 = 2.0;
const OVERSHOOT_TENSION: f32 = 2.0;
const ANTICIPATE_OVERSHOOT_TENSION: f32 = 3.0;

/// A caller-supplied easing function.
#[derive(Clone)]
pub struct CustomEasing(Arc<dyn Fn(f32) -> f32 + Send + Sync>);

impl CustomEasing {
    /// Wraps `f` as an easing curve.
    pub fn new(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for CustomEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomEasing(..)")
    }
}

impl PartialEq for CustomEasing {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Time remapping used by chart animations.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum EasingCurve {
    /// Constant velocity.
    #[default]
    Linear,
    /// Starts slow and speeds up.
    Accelerate,
    /// Starts fast and slows down.
    Decelerate,
    /// Slow at both ends, fast in the middle.
    AccelerateDecelerate,
    /// Pulls back before moving forward.
    Anticipate,
    /// Passes the target, then settles back.
    Overshoot,
    /// Pulls back, passes the target, then settles.
    AnticipateOvershoot,
    /// Bounces at the end.
    Bounce,
    /// Cubic Bézier (0.4, 0, 1, 1).
    FastOutLinearIn,
    /// Cubic Bézier (0.4, 0, 0.2, 1).
    FastOutSlowIn,
    /// Cubic Bézier (0, 0, 0.2, 1).
    LinearOutSlowIn,
    /// Caller-supplied curve.
    Custom(CustomEasing),
}

impl EasingCurve {
    const NAMED: [(&'static str, EasingCurve); 11] = [
        ("linear", EasingCurve::Linear),
        ("accelerate", EasingCurve::Accelerate),
        ("decelerate", EasingCurve::Decelerate),
        ("accelerate_decelerate", EasingCurve::AccelerateDecelerate),
        ("anticipate", EasingCurve::Anticipate),
        ("overshoot", EasingCurve::Overshoot),
        ("anticipate_overshoot", EasingCurve::AnticipateOvershoot),
        ("bounce", EasingCurve::Bounce),
        ("fast_out_linear_in", EasingCurve::FastOutLinearIn),
        ("fast_out_slow_in", EasingCurve::FastOutSlowIn),
        ("linear_out_slow_in", EasingCurve::LinearOutSlowIn),
    ];

    /// Resolves a selector index; unknown selectors fall back to linear.
    pub fn from_index(index: i32) -> Self {
        match usize::try_from(index).ok().and_then(|i| Self::NAMED.get(i)) {
            Some((_, curve)) => curve.clone(),
            None => {
                warn!(index, "unknown easing selector, using linear");
                Self::Linear
            }
        }
    }

    /// Resolves a snake_case curve name; unknown names fall back to linear.
    pub fn from_name(name: &str) -> Self {
        match Self::NAMED.iter().find(|(n, _)| *n == name) {
            Some((_, curve)) => curve.clone(),
            None => {
                warn!(name, "unknown easing curve, using linear");
                Self::Linear
            }
        }
    }

    /// The snake_case name of the curve.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Custom(_) => "custom",
            curve => Self::NAMED
                .iter()
                .find(|(_, c)| c == curve)
                .map_or("linear", |(n, _)| *n),
        }
    }

    /// Maps linear time `t` to the eased fraction. `t` is clamped to `[0, 1]`.
    pub fn transform(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Accelerate => t * t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Anticipate => anticipate(t, ANTICIPATE_TENSION),
            Self::Overshoot => overshoot(t - 1.0, OVERSHOOT_TENSION) + 1.0,
            Self::AnticipateOvershoot => {
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, ANTICIPATE_OVERSHOOT_TENSION)
                } else {
                    0.5 * (overshoot(t * 2.0 - 2.0, ANTICIPATE_OVERSHOOT_TENSION) + 2.0)
                }
            }
            Self::Bounce => bounce_out(t),
            Self::FastOutLinearIn => cubic_bezier_easing(t, 0.4, 0.0, 1.0, 1.0),
            Self::FastOutSlowIn => cubic_bezier_easing(t, 0.4, 0.0, 0.2, 1.0),
            Self::LinearOutSlowIn => cubic_bezier_easing(t, 0.0, 0.0, 0.2, 1.0),
            Self::Custom(custom) => (custom.0)(t),
        }
    }
}

impl From<String> for EasingCurve {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<EasingCurve> for String {
    fn from(curve: EasingCurve) -> Self {
        curve.name().to_owned()
    }
}

fn anticipate(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t - tension)
}

fn overshoot(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t + tension)
}

fn bounce(t: f32) -> f32 {
    t * t * 8.0
}

fn bounce_out(t: f32) -> f32 {
    let t = t * 1.1226;
    if t < 0.3535 {
        bounce(t)
    } else if t < 0.7408 {
        bounce(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce(t - 0.8526) + 0.9
    } else {
        bounce(t - 1.0435) + 0.95
    }
}

fn cubic_bezier(t: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    let u = 1.0 - t;
    (u * u * u * a) + (3.0 * u * u * t * b) + (3.0 * u * t * t * c) + (t * t * t * d)
}

fn cubic_bezier_easing(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut t = x;

    for _ in 0..24 {
        let mid = (lo + hi) * 0.5;
        let mid_x = cubic_bezier(mid, 0.0, x1, x2, 1.0);
        if mid_x < x {
            lo = mid;
        } else {
            hi = mid;
        }
        t = mid;
    }

    cubic_bezier(t, 0.0, y1, y2, 1.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_named() -> Vec<EasingCurve> {
        (0..11).map(EasingCurve::from_index).collect()
    }

    #[test]
    fn test_end_points() {
        for curve in all_named() {
            assert!(curve.transform(0.0).abs() < 1e-3, "{curve:?} at 0");
            assert!((curve.transform(1.0) - 1.0).abs() < 1e-3, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_index_and_name_round_trip() {
        for (index, curve) in all_named().into_iter().enumerate() {
            assert_eq!(EasingCurve::from_name(curve.name()), curve);
            assert_eq!(EasingCurve::from_index(index as i32), curve);
        }
    }

    #[test]
    fn test_unknown_selector_falls_back_to_linear() {
        assert_eq!(EasingCurve::from_index(11), EasingCurve::Linear);
        assert_eq!(EasingCurve::from_index(-3), EasingCurve::Linear);
        assert_eq!(EasingCurve::from_name("wobble"), EasingCurve::Linear);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(EasingCurve::Linear.transform(-2.0), 0.0);
        assert_eq!(EasingCurve::Linear.transform(4.0), 1.0);
        assert_eq!(EasingCurve::Accelerate.transform(f32::NAN), 0.0);
    }

    #[test]
    fn test_monotonic_curves() {
        let monotonic = [
            EasingCurve::Linear,
            EasingCurve::Accelerate,
            EasingCurve::Decelerate,
            EasingCurve::AccelerateDecelerate,
            EasingCurve::FastOutLinearIn,
            EasingCurve::FastOutSlowIn,
            EasingCurve::LinearOutSlowIn,
        ];
        for curve in monotonic {
            let mut last = curve.transform(0.0);
            for step in 1..=100 {
                let value = curve.transform(step as f32 / 100.0);
                assert!(value + 1e-4 >= last, "{curve:?} decreased at step {step}");
                last = value;
            }
        }
    }

    #[test]
    fn test_anticipate_and_overshoot_leave_unit_range() {
        assert!(EasingCurve::Anticipate.transform(0.2) < 0.0);
        assert!(EasingCurve::Overshoot.transform(0.8) > 1.0);
        assert!(EasingCurve::AnticipateOvershoot.transform(0.1) < 0.0);
        assert!(EasingCurve::AnticipateOvershoot.transform(0.9) > 1.0);
    }

    #[test]
    fn test_accelerate_decelerate_midpoint() {
        assert!((EasingCurve::AccelerateDecelerate.transform(0.5) - 0.5).abs() < 1e-5);
        assert!(EasingCurve::Accelerate.transform(0.5) < 0.5);
        assert!(EasingCurve::Decelerate.transform(0.5) > 0.5);
    }

    #[test]
    fn test_custom_curve() {
        let custom = CustomEasing::new(|t| t * t * t);
        let curve = EasingCurve::Custom(custom.clone());
        assert!((curve.transform(0.5) - 0.125).abs() < 1e-6);
        assert_eq!(curve, EasingCurve::Custom(custom));
        assert_ne!(curve, EasingCurve::Custom(CustomEasing::new(|t| t)));
        assert_eq!(curve.name(), "custom");
    }
}
