use anyhow::Result;

use tickruler_core::{build_tick_descriptors, RulerConfig, TickKind};

pub fn run(config: &RulerConfig, json: bool) -> Result<()> {
    let ticks = build_tick_descriptors(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&ticks)?);
        return Ok(());
    }

    println!(
        "{:>6}  {:>8}  {:<5}  {:>10}  {:<7}  LABEL",
        "INDEX", "VALUE", "KIND", "X", "MATCHED"
    );
    for tick in &ticks {
        let kind = match tick.kind {
            TickKind::Major => "major",
            TickKind::Minor => "minor",
        };
        println!(
            "{:>6}  {:>8}  {:<5}  {:>10.1}  {:<7}  {}",
            tick.tick_index,
            tick.value,
            kind,
            tick.line.x,
            if tick.is_matched { "yes" } else { "" },
            tick.label.as_deref().unwrap_or("")
        );
    }
    println!("\n{} ticks", ticks.len());

    Ok(())
}
