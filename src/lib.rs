pub mod banks;
pub mod batch;
pub mod clock;
pub mod config;
pub mod error;
pub mod payments;
pub mod telemetry;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use validation::{Field, Validation, ValidationReport};
