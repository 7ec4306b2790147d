// Profile and settings domain models
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub full_name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub member_since: String,
    #[serde(skip)]
    pub uptime_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FarmStats {
    pub active_ponds: usize,
    pub iot_devices: usize,
    pub uptime_percent: u8,
}

/// Per-session preference switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub notifications: bool,
    pub dark_mode: bool,
    pub auto_sync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            auto_sync: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Notifications,
    DarkMode,
    AutoSync,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting {0:?}")]
pub struct ToggleParseError(String);

impl FromStr for Toggle {
    type Err = ToggleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notifications" => Ok(Toggle::Notifications),
            "dark_mode" => Ok(Toggle::DarkMode),
            "auto_sync" => Ok(Toggle::AutoSync),
            other => Err(ToggleParseError(other.to_string())),
        }
    }
}

impl Settings {
    /// Flip one switch and return its new value.
    pub fn flip(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Notifications => &mut self.notifications,
            Toggle::DarkMode => &mut self.dark_mode,
            Toggle::AutoSync => &mut self.auto_sync,
        };
        *flag = !*flag;
        *flag
    }
}
