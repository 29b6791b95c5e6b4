//! Day record derivation.
//!
//! This is the heart of the engine: given one employee's punches for one
//! calendar day plus their schedule, produce the derived attendance record
//! (entry, lateness, checkout detection, anomaly flag). Pure and
//! deterministic; same inputs always yield the same record.

use crate::models::{DerivedDayRecord, EmployeeSchedule};
use shared::timeparse::{parse_timestamp, time_of_day_to_minutes};

/// Minimum gap between entry and a punch for it to count as the checkout.
/// Anything closer is treated as a double-tap at the clock.
pub const MIN_EXIT_GAP_MINUTES: i32 = 60;

/// Punch count above which a day is flagged as anomalous.
const MULTIPLE_PUNCH_THRESHOLD: usize = 2;

/// Derives the attendance record for one employee-day.
///
/// `day_punches` is the unordered list of that day's raw timestamps; all
/// entries share one calendar day (the grouping step guarantees it), so a
/// plain string sort orders them chronologically.
///
/// Lateness is strict: arriving exactly at `scheduled + tolerance` is on
/// time. The checkout is the *last* punch of the day when it falls at least
/// [`MIN_EXIT_GAP_MINUTES`] after the entry; intermediate punches never
/// suppress a real checkout, they only drive the multiple-punch flag.
///
/// Returns `None` for an empty group or an entry whose date cannot be
/// extracted.
pub fn derive_day_record(
    day_punches: &[String],
    schedule: &EmployeeSchedule,
) -> Option<DerivedDayRecord> {
    if day_punches.is_empty() {
        return None;
    }

    let mut sorted: Vec<&str> = day_punches.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let entry = sorted[0];
    let entry_stamp = parse_timestamp(entry)?;
    let entry_minutes = time_of_day_to_minutes(&entry_stamp.time_of_day);
    let scheduled_minutes = time_of_day_to_minutes(&schedule.scheduled_entry);

    let diff_minutes = entry_minutes - scheduled_minutes;
    let is_late = diff_minutes > schedule.tolerance_minutes;

    let mut exit_timestamp = None;
    let mut exit_time = None;
    if sorted.len() >= 2 {
        let last = sorted[sorted.len() - 1];
        if let Some(last_stamp) = parse_timestamp(last) {
            let gap = time_of_day_to_minutes(&last_stamp.time_of_day) - entry_minutes;
            if gap >= MIN_EXIT_GAP_MINUTES {
                exit_timestamp = Some(last.to_string());
                exit_time = Some(last_stamp.time_of_day);
            }
        }
    }

    Some(DerivedDayRecord {
        pin: schedule.pin.clone(),
        display_name: schedule.display_name.clone(),
        department: schedule.department.clone(),
        position: schedule.position.clone(),
        date: entry_stamp.date,
        entry_timestamp: entry.to_string(),
        entry_time: entry_stamp.time_of_day,
        exit_timestamp,
        exit_time,
        scheduled_entry: schedule.scheduled_entry.clone(),
        scheduled_exit: schedule.scheduled_exit.clone(),
        diff_minutes,
        is_late,
        has_multiple_punches: day_punches.len() > MULTIPLE_PUNCH_THRESHOLD,
    })
}
