use crate::interface::{CoverageSample, RangeOutcome};
use serde::{Deserialize, Serialize};

/// Aggregate view over a set of coverage samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub detected: usize,
    pub not_detectable: usize,
    pub exceeds_ceiling: usize,
    /// Sample with the longest detected range.
    pub best: Option<CoverageSample>,
    /// Sample with the shortest detected range.
    pub worst: Option<CoverageSample>,
    pub mean_range_m: Option<f64>,
}

impl CoverageStats {
    pub fn from_samples(samples: &[CoverageSample]) -> Self {
        let mut stats = CoverageStats {
            total: samples.len(),
            ..Default::default()
        };
        let mut range_sum = 0.0;

        for sample in samples {
            match &sample.outcome {
                RangeOutcome::Detected { max_range_m } => {
                    stats.detected += 1;
                    range_sum += max_range_m;
                    let longer = stats
                        .best
                        .as_ref()
                        .and_then(|best| best.outcome.max_range_m())
                        .map_or(true, |best| *max_range_m > best);
                    if longer {
                        stats.best = Some(sample.clone());
                    }
                    let shorter = stats
                        .worst
                        .as_ref()
                        .and_then(|worst| worst.outcome.max_range_m())
                        .map_or(true, |worst| *max_range_m < worst);
                    if shorter {
                        stats.worst = Some(sample.clone());
                    }
                }
                RangeOutcome::NotDetectable => stats.not_detectable += 1,
                RangeOutcome::ExceedsCeiling { .. } => stats.exceeds_ceiling += 1,
                RangeOutcome::Invalid { .. } => stats.invalid += 1,
            }
        }

        stats.valid = stats.total - stats.invalid;
        if stats.detected > 0 {
            stats.mean_range_m = Some(range_sum / stats.detected as f64);
        }
        stats
    }
}
