//! Device domain types.

use serde::{Deserialize, Serialize};

/// Kind of physical device a record represents.
///
/// Wire format: lowercase string (`"temperature"`, `"humidity"`, `"light"`,
/// `"fan"`). The set is closed — unknown kinds are rejected at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Temperature,
    Humidity,
    Light,
    Fan,
}

impl DeviceKind {
    /// Parse from the lowercase wire/storage string. Returns `None` for
    /// unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "temperature" => Some(Self::Temperature),
            "humidity" => Some(Self::Humidity),
            "light" => Some(Self::Light),
            "fan" => Some(Self::Fan),
            _ => None,
        }
    }

    /// Lowercase wire/storage string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Fan => "fan",
        }
    }
}

/// Connectivity status projected onto a device.
///
/// `Offline` is the initial state. Every accepted telemetry write sets
/// `Online`; there is no automatic downgrade back to `Offline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "online" => Some(Self::Online),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}
