//! Label normalization
//!
//! Fits a user-supplied label list onto the ticks that are eligible for a
//! label. Eligible ticks are the major ones, or every tick when sub-labels
//! are enabled.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::RulerConfig;
use crate::mapper::value_for_index;

#[inline]
pub fn is_major(index: usize, config: &RulerConfig) -> bool {
    index as i64 % config.interval == 0
}

#[inline]
pub fn is_label_eligible(index: usize, config: &RulerConfig) -> bool {
    config.label_style.show_sub_labels || is_major(index, config)
}

/// Tick indices that carry a label, ascending
pub fn eligible_tick_indices(config: &RulerConfig) -> Vec<usize> {
    (0..config.tick_count())
        .filter(|&index| is_label_eligible(index, config))
        .collect()
}

/// Value-as-string label for every eligible tick, ascending
pub fn generated_labels(config: &RulerConfig) -> Vec<String> {
    eligible_tick_indices(config)
        .into_iter()
        .map(|index| value_for_index(index, config).to_string())
        .collect()
}

/// Fit `custom` to the length of `generated`.
///
/// Returns `None` when there is nothing to override. A longer list is
/// truncated. A shorter one is extended with entries walked backward from
/// the end of `generated`, skipping a candidate that repeats the entry
/// right before it, and appended in ascending order.
pub fn normalize_labels(generated: &[String], custom: Option<&[String]>) -> Option<Vec<String>> {
    let custom = custom.filter(|labels| !labels.is_empty())?;
    let desired = generated.len();

    if custom.len() >= desired {
        return Some(custom[..desired].to_vec());
    }

    let mut normalized = custom.to_vec();
    let needed = desired - normalized.len();

    let mut tail: Vec<&String> = Vec::with_capacity(needed);
    for candidate in generated.iter().rev() {
        if tail.len() == needed {
            break;
        }
        let previous = tail.last().copied().or(normalized.last());
        if previous == Some(candidate) {
            continue;
        }
        tail.push(candidate);
    }
    normalized.extend(tail.into_iter().rev().cloned());

    if normalized.len() < desired {
        warn!(
            have = normalized.len(),
            desired, "Label tail walk came up short, padding from the start"
        );
        pad_forward(&mut normalized, generated, desired);
    }

    Some(normalized)
}

/// Fill from the front of `generated`, avoiding immediate repeats when possible
fn pad_forward(normalized: &mut Vec<String>, generated: &[String], desired: usize) {
    for candidate in generated {
        if normalized.len() == desired {
            return;
        }
        if normalized.last() != Some(candidate) {
            normalized.push(candidate.clone());
        }
    }
    // Only repeats left; accept them
    let mut cycle = generated.iter().cycle();
    while normalized.len() < desired {
        match cycle.next() {
            Some(candidate) => normalized.push(candidate.clone()),
            None => return,
        }
    }
}

/// Label for every eligible tick index, with custom labels applied
pub fn resolve_labels(config: &RulerConfig) -> BTreeMap<usize, String> {
    let indices = eligible_tick_indices(config);
    let generated: Vec<String> = indices
        .iter()
        .map(|&index| value_for_index(index, config).to_string())
        .collect();

    let labels = normalize_labels(&generated, config.custom_labels.as_deref()).unwrap_or(generated);
    indices.into_iter().zip(labels).collect()
}
