use anyhow::Result;

use tickruler_core::labels::{generated_labels, resolve_labels};
use tickruler_core::mapper::value_for_index;
use tickruler_core::RulerConfig;

pub fn run(config: &RulerConfig) -> Result<()> {
    let labels = resolve_labels(config);

    if labels.is_empty() {
        println!("No labelled ticks.");
        return Ok(());
    }

    match &config.custom_labels {
        Some(custom) if !custom.is_empty() => println!(
            "Custom labels: {} supplied for {} labelled ticks\n",
            custom.len(),
            generated_labels(config).len()
        ),
        _ => println!("Generated labels\n"),
    }

    for (index, label) in &labels {
        println!("  {:>6}  {:>8}  {}", index, value_for_index(*index, config), label);
    }

    Ok(())
}
