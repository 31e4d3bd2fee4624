//! Per-tick render model
//!
//! [`build_tick_descriptors`] derives everything a renderer needs to draw
//! the strip. The output depends only on the config.

use serde::Serialize;

use crate::config::{LabelAlignment, RulerConfig};
use crate::labels::{is_major, resolve_labels};
use crate::mapper::value_for_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickKind {
    Major,
    Minor,
}

/// Vertical line to draw for a tick, in content coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLine {
    pub x: f64,
    pub height: f64,
    pub thickness: f64,
    pub color: String,
}

/// Where a label goes, relative to the major tick extent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub x: f64,
    /// Distance from the top of the strip. Negative means above it.
    pub y: f64,
    pub rotation_degrees: f64,
    pub alignment: LabelAlignment,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickDescriptor {
    pub tick_index: usize,
    pub value: i64,
    pub kind: TickKind,
    pub is_matched: bool,
    pub line: TickLine,
    pub label: Option<String>,
    pub label_placement: Option<LabelPlacement>,
}

impl TickDescriptor {
    #[inline]
    pub fn is_major(&self) -> bool {
        self.kind == TickKind::Major
    }
}

/// Blank space before tick 0 so that offset 0 centres it in the viewport
#[inline]
pub fn leading_padding(config: &RulerConfig) -> f64 {
    config.viewport_width / 2.0
}

/// Total scrollable content width including padding on both sides
pub fn content_width(config: &RulerConfig) -> f64 {
    let ticks = config.tick_count().saturating_sub(1) as f64 * config.tick_spacing;
    ticks + 2.0 * leading_padding(config)
}

/// Content x of the tick at `index`
#[inline]
pub fn tick_x(index: usize, config: &RulerConfig) -> f64 {
    leading_padding(config) + index as f64 * config.tick_spacing
}

/// One descriptor per tick, in index order
pub fn build_tick_descriptors(config: &RulerConfig) -> Vec<TickDescriptor> {
    let mut labels = resolve_labels(config);
    let style = &config.tick_style;
    let label_style = &config.label_style;

    (0..config.tick_count())
        .map(|index| {
            let value = value_for_index(index, config);
            let kind = if is_major(index, config) {
                TickKind::Major
            } else {
                TickKind::Minor
            };
            let is_matched = config.is_matched(value);

            let (height, thickness) = match kind {
                TickKind::Major => (style.major_height, style.major_thickness),
                TickKind::Minor => (style.minor_height, style.minor_thickness),
            };
            let color = if is_matched {
                style.matched_color.clone()
            } else if kind == TickKind::Major {
                style.major_color.clone()
            } else {
                style.minor_color.clone()
            };

            let x = tick_x(index, config);
            let label = labels.remove(&index);
            let label_placement = label.as_ref().map(|_| {
                let y = match label_style.alignment {
                    LabelAlignment::Top => -label_style.spacing,
                    LabelAlignment::Bottom => style.major_height + label_style.spacing,
                };
                LabelPlacement {
                    x,
                    y,
                    rotation_degrees: label_style.rotation_degrees,
                    alignment: label_style.alignment,
                    color: if is_matched {
                        style.matched_color.clone()
                    } else {
                        label_style.color.clone()
                    },
                }
            });

            TickDescriptor {
                tick_index: index,
                value,
                kind,
                is_matched,
                line: TickLine {
                    x,
                    height,
                    thickness,
                    color,
                },
                label,
                label_placement,
            }
        })
        .collect()
}
