use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use iothub_devices::domain::repository::{DeviceRepository, TelemetryRepository};
use iothub_devices::domain::types::{Device, Reading};
use iothub_devices::error::DevicesServiceError;
use iothub_domain::device::{DeviceKind, DeviceStatus};

// ── MockDeviceRepo ───────────────────────────────────────────────────────────

pub struct MockDeviceRepo {
    pub devices: Arc<Mutex<Vec<Device>>>,
}

impl MockDeviceRepo {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices: Arc::new(Mutex::new(devices)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal device list for post-execution inspection.
    pub fn devices_handle(&self) -> Arc<Mutex<Vec<Device>>> {
        Arc::clone(&self.devices)
    }
}

impl DeviceRepository for MockDeviceRepo {
    async fn create(&self, device: &Device) -> Result<(), DevicesServiceError> {
        self.devices.lock().unwrap().push(device.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DevicesServiceError> {
        Ok(self
            .devices
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>, DevicesServiceError> {
        Ok(self
            .devices
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn update_attrs(
        &self,
        id: Uuid,
        name: &str,
        location: &str,
        unit: &str,
    ) -> Result<(), DevicesServiceError> {
        let mut devices = self.devices.lock().unwrap();
        if let Some(d) = devices.iter_mut().find(|d| d.id == id) {
            d.name = name.to_owned();
            d.location = location.to_owned();
            d.unit = unit.to_owned();
        }
        Ok(())
    }
}

// ── MockTelemetryRepo ────────────────────────────────────────────────────────

/// In-memory reading log that maintains the device projection with the same
/// last-writer-wins guard as the database-backed repository.
pub struct MockTelemetryRepo {
    pub readings: Arc<Mutex<Vec<Reading>>>,
    pub devices: Arc<Mutex<Vec<Device>>>,
}

impl MockTelemetryRepo {
    pub fn new(devices: Arc<Mutex<Vec<Device>>>) -> Self {
        Self {
            readings: Arc::new(Mutex::new(vec![])),
            devices,
        }
    }

    pub fn readings_handle(&self) -> Arc<Mutex<Vec<Reading>>> {
        Arc::clone(&self.readings)
    }
}

impl TelemetryRepository for MockTelemetryRepo {
    async fn record(&self, reading: &Reading) -> Result<Device, DevicesServiceError> {
        self.readings.lock().unwrap().push(reading.clone());
        let mut devices = self.devices.lock().unwrap();
        let device = devices
            .iter_mut()
            .find(|d| d.id == reading.device_id)
            .ok_or(DevicesServiceError::DeviceNotFound)?;
        if device.last_updated <= reading.captured_at {
            device.current_value = reading.value;
            device.status = DeviceStatus::Online;
            device.last_updated = reading.captured_at;
        }
        Ok(device.clone())
    }

    async fn history_since(
        &self,
        device_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Reading>, DevicesServiceError> {
        let mut result: Vec<Reading> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.device_id == device_id && r.captured_at >= since)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.captured_at);
        Ok(result)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_owner_id() -> Uuid {
    Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
}

pub fn test_device(owner_id: Uuid) -> Device {
    Device::new(
        owner_id,
        "Living room sensor".to_owned(),
        DeviceKind::Temperature,
        "living room".to_owned(),
        "°C".to_owned(),
    )
}

pub fn reading_at(device_id: Uuid, value: f64, captured_at: DateTime<Utc>) -> Reading {
    Reading {
        id: Uuid::new_v4(),
        device_id,
        value,
        captured_at,
    }
}
