use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tickruler_core::{AppConfig, RulerConfig};

mod commands;

#[derive(Parser)]
#[command(name = "tickruler")]
#[command(author, version, about = "A horizontal scroll ruler for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/tickruler/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: RulerOverrides,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Start the interactive ruler
    Run,
    /// Print the tick render model
    Ticks {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the label resolved for each labelled tick
    Labels,
    /// Map a scroll offset to its value and nearest tick
    #[command(allow_negative_numbers = true)]
    Value {
        /// Content offset in pixels
        offset: f64,
    },
    /// Show the effective configuration
    Config {
        /// Print the config file path only
        #[arg(long)]
        path: bool,
    },
}

/// Command-line overrides for the `[ruler]` config section
#[derive(Args, Debug, Default, PartialEq)]
struct RulerOverrides {
    /// Smallest value on the ruler
    #[arg(long, global = true, allow_hyphen_values = true)]
    min: Option<i64>,
    /// Largest value on the ruler
    #[arg(long, global = true, allow_hyphen_values = true)]
    max: Option<i64>,
    /// Value shown when the ruler opens
    #[arg(long, global = true, allow_hyphen_values = true)]
    initial: Option<i64>,
    /// Ticks between major ticks
    #[arg(long, global = true)]
    interval: Option<i64>,
    /// Sub-steps per whole value
    #[arg(long = "smaller-interval", global = true)]
    smaller_interval: Option<i64>,
    /// Pixels between ticks
    #[arg(long, global = true)]
    spacing: Option<f64>,
    /// Disable snap-to-tick
    #[arg(long = "no-snap", global = true)]
    no_snap: bool,
    /// Custom labels, comma separated
    #[arg(long, global = true, value_delimiter = ',')]
    labels: Option<Vec<String>>,
    /// Values to highlight, comma separated
    #[arg(long = "match", global = true, value_delimiter = ',', allow_hyphen_values = true)]
    match_values: Option<Vec<i64>>,
}

impl RulerOverrides {
    fn apply(&self, ruler: &mut RulerConfig) {
        if let Some(min) = self.min {
            ruler.min_value = min;
        }
        if let Some(max) = self.max {
            ruler.max_value = max;
        }
        match self.initial {
            Some(initial) => ruler.initial_value = initial,
            // A new range drags the configured initial value along with it
            None if ruler.min_value < ruler.max_value => {
                let clamped = ruler.initial_value.clamp(ruler.min_value, ruler.max_value);
                if clamped != ruler.initial_value {
                    debug!(from = ruler.initial_value, to = clamped, "Clamped initial value");
                    ruler.initial_value = clamped;
                }
            }
            None => {}
        }
        if let Some(interval) = self.interval {
            ruler.interval = interval;
        }
        if let Some(smaller) = self.smaller_interval {
            ruler.smaller_interval = smaller;
        }
        if let Some(spacing) = self.spacing {
            ruler.tick_spacing = spacing;
        }
        if self.no_snap {
            ruler.snapping = false;
        }
        if let Some(labels) = &self.labels {
            ruler.custom_labels = Some(labels.clone());
        }
        if let Some(values) = &self.match_values {
            ruler.match_values = values.clone();
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)?;

    let command = cli.command.unwrap_or(Commands::Run);
    // Log lines would land on the alternate screen, so the TUI stays quiet unless RUST_LOG asks
    let level = if command == Commands::Run {
        "off"
    } else {
        config.general.log_level.as_str()
    };
    init_logging(level);

    cli.overrides.apply(&mut config.ruler);
    config.ruler.validate()?;

    match command {
        Commands::Run => commands::run::run(config).await,
        Commands::Ticks { json } => commands::ticks::run(&config.ruler, json),
        Commands::Labels => commands::labels::run(&config.ruler),
        Commands::Value { offset } => commands::value::run(&config.ruler, offset),
        Commands::Config { path } => commands::config::run(&config, &config_path, path),
    }
}
