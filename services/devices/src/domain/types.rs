use chrono::{DateTime, Utc};
use uuid::Uuid;

use iothub_domain::device::{DeviceKind, DeviceStatus};

/// Registered device together with its current-state projection.
///
/// `current_value`, `status` and `last_updated` mirror the newest accepted
/// reading. They are a cache over the reading log, not an independent
/// source of truth.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub kind: DeviceKind,
    pub location: String,
    pub unit: String,
    pub status: DeviceStatus,
    pub current_value: f64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Device {
    /// Fresh device before any telemetry has arrived.
    pub fn new(
        owner_id: Uuid,
        name: String,
        kind: DeviceKind,
        location: String,
        unit: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            kind,
            location,
            unit,
            status: DeviceStatus::Offline,
            current_value: 0.0,
            last_updated: now,
            created_at: now,
        }
    }
}

/// One immutable telemetry reading.
#[derive(Debug, Clone)]
pub struct Reading {
    pub id: Uuid,
    pub device_id: Uuid,
    pub value: f64,
    pub captured_at: DateTime<Utc>,
}

/// Default history window when the caller does not pass `hours`.
pub const DEFAULT_HISTORY_HOURS: i64 = 24;
