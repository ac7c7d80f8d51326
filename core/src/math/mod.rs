pub mod stats;
pub mod units;

pub use stats::CoverageStats;
pub use units::UnitsHelper;
