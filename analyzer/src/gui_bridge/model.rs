use radarcov::math::CoverageStats;
use radarcov::telemetry::Progress;
use radarcov::CoverageSample;
use serde::{Deserialize, Serialize};

/// Latest coverage result served to external viewers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageView {
    pub label: Option<String>,
    pub samples: Vec<CoverageSample>,
    pub stats: CoverageStats,
    pub progress: Progress,
}

impl CoverageView {
    /// View of a finished sweep. Progress is derived from the samples, not
    /// read back from the engine, which may already be running another sweep.
    pub fn new(label: Option<String>, samples: Vec<CoverageSample>) -> Self {
        let stats = CoverageStats::from_samples(&samples);
        let progress = Progress {
            total: stats.total,
            completed: stats.total,
            failed: stats.invalid,
        };
        Self {
            label,
            samples,
            stats,
            progress,
        }
    }
}
