// Sensor device domain model
use serde::{Serialize, Serializer};
use std::fmt;

pub const LOW_BATTERY_PERCENT: u8 = 20;

/// Minutes since a device last synced, rendered the way the device list shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LastSync(u32);

impl LastSync {
    pub fn minutes_ago(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn hours_ago(hours: u32) -> Self {
        Self(hours * 60)
    }
}

impl fmt::Display for LastSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("just now"),
            m if m < 60 => write!(f, "{} min ago", m),
            m if m < 120 => f.write_str("1 hour ago"),
            m if m < 24 * 60 => write!(f, "{} hours ago", m / 60),
            m if m < 48 * 60 => f.write_str("1 day ago"),
            m => write!(f, "{} days ago", m / (24 * 60)),
        }
    }
}

impl Serialize for LastSync {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub location: String,
    pub online: bool,
    pub battery_percent: u8,
    pub low_battery: bool,
    pub last_sync: LastSync,
    pub firmware_version: String,
}

impl Device {
    pub fn new(
        id: &str,
        name: &str,
        location: &str,
        online: bool,
        battery_percent: u8,
        last_sync: LastSync,
        firmware_version: &str,
    ) -> Self {
        let battery_percent = battery_percent.min(100);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            online,
            battery_percent,
            low_battery: battery_percent <= LOW_BATTERY_PERCENT,
            last_sync,
            firmware_version: firmware_version.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Strong,
    Medium,
}

/// An unpaired sensor within range of the phone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableDevice {
    pub id: String,
    pub name: String,
    pub signal: Signal,
    pub distance_meters: u32,
}

impl AvailableDevice {
    pub fn new(id: &str, name: &str, signal: Signal, distance_meters: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            signal,
            distance_meters,
        }
    }
}
