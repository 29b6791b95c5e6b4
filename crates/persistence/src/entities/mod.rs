//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod employee;
pub mod punch;

pub use employee::EmployeeEntity;
pub use punch::PunchEntity;
