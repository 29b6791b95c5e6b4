//! Domain model definitions.

pub mod attendance;
pub mod employee;
pub mod punch;

pub use attendance::{
    AttendanceStats, ChronicAlert, DepartmentRollup, DerivedDayRecord, ScheduleRollup,
};
pub use employee::{EmployeeSchedule, RawEmployeeRow, UpdateEmployeeRequest};
pub use punch::Punch;
