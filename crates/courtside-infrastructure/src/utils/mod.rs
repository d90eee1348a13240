//! Infrastructure utilities

pub mod clock;
pub mod timing;

pub use clock::{ManualClock, SystemClock};
pub use timing::TimedOperation;
