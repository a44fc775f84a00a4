mod clock;
mod error;
mod tracker;

pub use clock::{Clock, SystemClock};
pub use error::TrackerError;
pub use tracker::{Tracker, DEFAULT_INTERVAL};
