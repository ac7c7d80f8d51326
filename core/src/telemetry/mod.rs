pub mod log;
pub mod progress;

pub use self::log::LogManager;
pub use progress::{Progress, SweepProgress};
