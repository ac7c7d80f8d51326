pub mod grid;
pub mod search;
pub mod span;
pub mod sweep;

pub use grid::CoverageGrid;
pub use search::{bisect_max_range, MaxRangeSearch, SearchBounds};
pub use span::{grid_point_count, MAX_SPAN_POINTS, MAX_SWEEP_POINTS};
pub use sweep::{CoverageSweepEngine, SweepIter};
