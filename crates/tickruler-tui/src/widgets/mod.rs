mod ruler;
mod status_bar;

pub use ruler::RulerWidget;
pub use status_bar::StatusBarWidget;
