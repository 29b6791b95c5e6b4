//! Daily grouping and period aggregation.
//!
//! Everything here is a pure function over explicit snapshots of punches and
//! roster; derived results are recomputed on every call and never cached.

use std::collections::BTreeMap;

use crate::models::{
    AttendanceStats, ChronicAlert, DepartmentRollup, DerivedDayRecord, EmployeeSchedule,
    Punch, ScheduleRollup,
};
use crate::services::derivation::derive_day_record;
use shared::timeparse::parse_timestamp;

/// Late days within one month at which an employee is flagged.
pub const CHRONIC_LATE_THRESHOLD: i64 = 3;

/// Groups one employee's punches by calendar day.
///
/// Punches whose timestamp yields no date are dropped here (one bad row must
/// not blank out a month's report). Repeated identical timestamps are kept;
/// they count toward the multiple-punch anomaly.
pub fn group_by_day(punches: &[Punch], pin: &str) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for punch in punches {
        if punch.pin != pin {
            continue;
        }
        let Some(stamp) = parse_timestamp(&punch.timestamp) else {
            tracing::debug!(pin = %punch.pin, raw = %punch.timestamp, "Dropping unparsable punch");
            continue;
        };
        groups
            .entry(stamp.date)
            .or_default()
            .push(punch.timestamp.clone());
    }
    groups
}

/// Derives day records for every employee on the roster.
///
/// The roster drives the iteration: each employee's punches are grouped in
/// isolation, so one employee's records can never leak into another's, and
/// punches with pins not on the roster never produce a record. Output is
/// sorted date-descending, then name ascending.
pub fn derive_for_roster(
    punches: &[Punch],
    roster: &[EmployeeSchedule],
) -> Vec<DerivedDayRecord> {
    let mut records = Vec::new();
    for schedule in roster {
        for day_punches in group_by_day(punches, &schedule.pin).values() {
            if let Some(record) = derive_day_record(day_punches, schedule) {
                records.push(record);
            }
        }
    }
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    records
}

/// Folds derived records into the headline counts.
pub fn summarize(records: &[DerivedDayRecord]) -> AttendanceStats {
    AttendanceStats {
        total: records.len() as i64,
        on_time: records.iter().filter(|r| !r.is_late).count() as i64,
        late: records.iter().filter(|r| r.is_late).count() as i64,
        alerts: records.iter().filter(|r| r.has_multiple_punches).count() as i64,
    }
}

/// On-time/late tallies per department, sorted by department name.
pub fn department_rollups(records: &[DerivedDayRecord]) -> Vec<DepartmentRollup> {
    let mut tallies: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for record in records {
        let entry = tallies.entry(&record.department).or_default();
        if record.is_late {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }
    tallies
        .into_iter()
        .map(|(department, (on_time, late))| DepartmentRollup {
            department: department.to_string(),
            on_time,
            late,
        })
        .collect()
}

/// On-time/late tallies per `"entry - exit"` schedule, sorted by label.
pub fn schedule_rollups(records: &[DerivedDayRecord]) -> Vec<ScheduleRollup> {
    let mut tallies: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for record in records {
        let label = format!("{} - {}", record.scheduled_entry, record.scheduled_exit);
        let entry = tallies.entry(label).or_default();
        if record.is_late {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }
    tallies
        .into_iter()
        .map(|(schedule, (on_time, late))| ScheduleRollup {
            schedule,
            on_time,
            late,
        })
        .collect()
}

/// Flags employees with [`CHRONIC_LATE_THRESHOLD`] or more late days among
/// the given records (callers pass one month's worth). Sorted by late-day
/// count descending, pin ascending on ties.
pub fn chronic_alerts(records: &[DerivedDayRecord]) -> Vec<ChronicAlert> {
    let mut late_days: BTreeMap<&str, (i64, &str)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_late) {
        let entry = late_days
            .entry(record.pin.as_str())
            .or_insert((0, record.display_name.as_str()));
        entry.0 += 1;
    }

    let mut alerts: Vec<ChronicAlert> = late_days
        .into_iter()
        .filter(|(_, (count, _))| *count >= CHRONIC_LATE_THRESHOLD)
        .map(|(pin, (late_days, display_name))| ChronicAlert {
            pin: pin.to_string(),
            display_name: display_name.to_string(),
            late_days,
        })
        .collect();
    alerts.sort_by(|a, b| b.late_days.cmp(&a.late_days).then_with(|| a.pin.cmp(&b.pin)));
    alerts
}
