pub mod config;
pub mod link;
pub mod target;

pub use config::RadarSystemConfig;
pub use link::{LinkBudget, RadarLinkModel};
pub use target::TargetGeometry;
