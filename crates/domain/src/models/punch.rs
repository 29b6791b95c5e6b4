//! Raw clock punch model.

use serde::{Deserialize, Serialize};

/// A single clock-in/clock-out event as recorded by the time clock.
///
/// Punches are normalized into this shape at the ingestion boundary; nothing
/// downstream branches on the source's field naming or casing. The timestamp
/// stays a string: the engine extracts date and time-of-day lexically and
/// never converts instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Punch {
    /// Employee identifier as typed into the clock device.
    pub pin: String,
    /// Raw timestamp string, e.g. `2026-01-07T16:44:45Z` or `2026-01-07 16:44:45`.
    pub timestamp: String,
    /// Address of the clock device that recorded the punch, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_ip: Option<String>,
}

impl Punch {
    /// Normalizes a raw (pin, timestamp) pair into a `Punch`.
    ///
    /// Returns `None` when either side is blank after trimming; such rows are
    /// unusable for grouping and are dropped rather than propagated.
    pub fn normalize(pin: &str, timestamp: &str, device_ip: Option<&str>) -> Option<Self> {
        let pin = pin.trim();
        let timestamp = timestamp.trim();
        if pin.is_empty() || timestamp.is_empty() {
            return None;
        }
        Some(Self {
            pin: pin.to_string(),
            timestamp: timestamp.to_string(),
            device_ip: device_ip.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        })
    }
}
