//! Attendance derivation services.

pub mod aggregation;
pub mod derivation;
