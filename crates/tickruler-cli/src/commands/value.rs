use anyhow::Result;

use tickruler_core::mapper::{
    clamp_offset, nearest_tick_index, offset_for_value, value_for_index, value_for_offset, value_precision,
};
use tickruler_core::RulerConfig;

pub fn run(config: &RulerConfig, offset: f64) -> Result<()> {
    let precision = value_precision(config.smaller_interval);
    let index = nearest_tick_index(offset, config);
    let tick_value = value_for_index(index, config);

    println!("Offset:       {:.2}", clamp_offset(offset, config));
    println!("Value:        {:.*}", precision, value_for_offset(offset, config));
    println!("Nearest tick: {} (value {}, offset {:.2})", index, tick_value, offset_for_value(tick_value, config));

    Ok(())
}
