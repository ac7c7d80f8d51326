use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Completed/total accounting for a running sweep.
///
/// Read-only side channel: it never influences the samples a sweep produces.
pub struct SweepProgress {
    inner: Mutex<Progress>,
}

/// Point-in-time copy of sweep progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

impl Progress {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            100 * self.completed / self.total
        }
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

impl SweepProgress {
    /// Tracker for one sweep of `total` points.
    pub fn new(total: usize) -> Self {
        Self {
            inner: Mutex::new(Progress {
                total,
                completed: 0,
                failed: 0,
            }),
        }
    }

    /// Records one finished point and returns the updated snapshot.
    pub fn record_point(&self, valid: bool) -> Progress {
        if let Ok(mut progress) = self.inner.lock() {
            progress.completed += 1;
            if !valid {
                progress.failed += 1;
            }
            *progress
        } else {
            Progress::default()
        }
    }

    pub fn snapshot(&self) -> Progress {
        if let Ok(progress) = self.inner.lock() {
            *progress
        } else {
            Progress::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_completed_and_failed_points() {
        let progress = SweepProgress::new(4);
        assert_eq!(progress.snapshot(), Progress { total: 4, completed: 0, failed: 0 });
        progress.record_point(true);
        progress.record_point(false);
        let snapshot = progress.record_point(true);
        assert_eq!(snapshot.completed, 3);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.percent(), 75);
        assert!(!snapshot.is_done());
        assert!(progress.record_point(true).is_done());
    }
}
