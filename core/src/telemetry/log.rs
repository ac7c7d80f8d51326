use log::{debug, info, warn};

/// Thin wrapper over the `log` facade shared by the link model and sweeps.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        debug!(target: self.target, "{}", message);
    }
}
