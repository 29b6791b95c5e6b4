//! HTTP route handlers.

pub mod attendance;
pub mod employees;
pub mod health;
pub mod punches;
