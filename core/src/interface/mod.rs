pub mod request;
pub mod sample;

pub use request::{AngularSpan, SweepRequest};
pub use sample::{CoverageSample, RangeOutcome};
