//! Easing curves for the snap animation. Each maps progress in [0, 1] onto [0, 1].

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Eased value at progress `t`; `t` is clamped first and NaN counts as finished
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::None => step(t),
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut => ease_out_expo(t),
            EasingType::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[inline]
fn step(t: f64) -> f64 {
    if t < 1.0 {
        0.0
    } else {
        1.0
    }
}

/// 1 - (1 - t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// 1 - 2^(-10t), pinned to exactly 1 at the end
#[inline]
fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    1.0 - 2.0_f64.powf(-10.0 * t)
}
