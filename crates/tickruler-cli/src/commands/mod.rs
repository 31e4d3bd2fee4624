pub mod config;
pub mod labels;
pub mod run;
pub mod ticks;
pub mod value;
