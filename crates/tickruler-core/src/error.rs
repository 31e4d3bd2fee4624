use thiserror::Error;

/// Rejections raised while validating a [`crate::RulerConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid range: min_value ({min}) must be less than max_value ({max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("Range [{min}, {max}] has more than {limit} ticks")]
    RangeTooLarge { min: i64, max: i64, limit: usize },

    #[error("Interval must be positive, got {0}")]
    NonPositiveInterval(i64),

    #[error("Smaller interval must be positive, got {0}")]
    NonPositiveSmallerInterval(i64),

    #[error("Tick spacing must be a positive finite number, got {0}")]
    NonPositiveTickSpacing(f64),

    #[error("Initial value {value} is outside [{min}, {max}]")]
    InitialValueOutOfRange { value: i64, min: i64, max: i64 },

    #[error("Match value {value} is outside [{min}, {max}]")]
    MatchValueOutOfRange { value: i64, min: i64, max: i64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
