pub mod config;
pub mod error;
pub mod labels;
pub mod layout;
pub mod mapper;
pub mod scroll;
pub mod session;
pub mod snap;
pub mod viewport;

pub use config::{AppConfig, EasingType, LabelAlignment, LabelStyle, RulerConfig, TickStyle};
pub use error::{ConfigError, Error, Result};
pub use layout::{build_tick_descriptors, TickDescriptor, TickKind};
pub use session::ScrollSession;
pub use snap::{SnapPhase, SnapScheduler};
pub use viewport::{AnimationStatus, SimulatedViewport, Viewport};
