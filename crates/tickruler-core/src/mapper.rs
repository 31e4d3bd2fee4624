//! Conversions between scroll offset, tick index and reported value
//!
//! All functions are pure and assume a validated [`RulerConfig`].

use crate::config::RulerConfig;

/// Largest offset the content can scroll to, `(tick_count - 1) * tick_spacing`
#[inline]
pub fn max_scroll_extent(config: &RulerConfig) -> f64 {
    config.tick_count().saturating_sub(1) as f64 * config.tick_spacing
}

/// Clamp an offset into `[0, max_scroll_extent]`; NaN maps to 0
#[inline]
pub fn clamp_offset(offset: f64, config: &RulerConfig) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max_scroll_extent(config))
}

/// Value under the indicator at `offset`, at sub-step resolution.
///
/// Rounds once on the sub-step count (ties away from zero) so the result
/// is always an exact multiple of `1 / smaller_interval` from `min_value`.
pub fn value_for_offset(offset: f64, config: &RulerConfig) -> f64 {
    let offset = clamp_offset(offset, config);
    let smaller = config.smaller_interval as f64;
    let sub_step_px = config.tick_spacing / smaller;
    let sub_steps = (offset / sub_step_px).round();
    let value = config.min_value as f64 + sub_steps / smaller;
    value.clamp(config.min_value as f64, config.max_value as f64)
}

/// Offset that centres the integer `value` under the indicator
#[inline]
pub fn offset_for_value(value: i64, config: &RulerConfig) -> f64 {
    value.saturating_sub(config.min_value) as f64 * config.tick_spacing
}

/// Index of the tick closest to `offset`, clamped to the tick range
pub fn nearest_tick_index(offset: f64, config: &RulerConfig) -> usize {
    if offset.is_nan() {
        return 0;
    }
    let last = config.tick_count().saturating_sub(1) as f64;
    (offset / config.tick_spacing).round().clamp(0.0, last) as usize
}

/// Integer value of the tick at `index`
#[inline]
pub fn value_for_index(index: usize, config: &RulerConfig) -> i64 {
    config.min_value + index as i64
}

/// Decimal places needed to show every sub-step of `smaller_interval` exactly, capped at 3
pub fn value_precision(smaller_interval: i64) -> usize {
    (0..=3u32)
        .find(|&digits| smaller_interval > 0 && 10_i64.pow(digits) % smaller_interval == 0)
        .unwrap_or(3) as usize
}
