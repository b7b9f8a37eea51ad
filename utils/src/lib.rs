//! Shared utilities: tracing setup and small time helpers.

pub mod logging;
pub mod time;

pub use logging::init_tracing;
pub use time::{days_until, format_duration};
