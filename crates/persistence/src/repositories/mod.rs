//! Repository implementations for database operations.

pub mod employee;
pub mod punch;

pub use employee::{EmployeeRepository, EmployeeUpdate};
pub use punch::{PunchRepository, MAX_PUNCH_BATCH};
