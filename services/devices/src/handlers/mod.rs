pub mod device;
pub mod telemetry;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use iothub_domain::device::{DeviceKind, DeviceStatus};

use crate::domain::types::{Device, Reading};

#[derive(Serialize)]
pub struct DeviceResponse {
    pub id: Uuid,
    pub name: String,
    pub kind: DeviceKind,
    pub location: String,
    pub unit: String,
    pub status: DeviceStatus,
    pub current_value: f64,
    #[serde(serialize_with = "iothub_core::serde::to_rfc3339_ms")]
    pub last_updated: DateTime<Utc>,
    #[serde(serialize_with = "iothub_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            kind: device.kind,
            location: device.location,
            unit: device.unit,
            status: device.status,
            current_value: device.current_value,
            last_updated: device.last_updated,
            created_at: device.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ReadingResponse {
    pub id: Uuid,
    pub device_id: Uuid,
    pub value: f64,
    #[serde(serialize_with = "iothub_core::serde::to_rfc3339_ms")]
    pub captured_at: DateTime<Utc>,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            device_id: reading.device_id,
            value: reading.value,
            captured_at: reading.captured_at,
        }
    }
}
