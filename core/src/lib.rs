//! Detection-range resolution core for radar coverage analysis.
//!
//! A [`RadarLinkModel`] evaluates the monostatic radar range equation against
//! an injected [`GainModel`]; [`MaxRangeSearch`] inverts it by bisection, and
//! [`CoverageSweepEngine`] repeats that search over angular grids.

pub mod coverage;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod radar;
pub mod telemetry;

pub use coverage::{CoverageGrid, CoverageSweepEngine, MaxRangeSearch, SearchBounds};
pub use interface::{AngularSpan, CoverageSample, RangeOutcome};
pub use prelude::{CoverageError, CoverageResult, GainError, GainModel, GainQuery};
pub use radar::{LinkBudget, RadarLinkModel, RadarSystemConfig, TargetGeometry};
