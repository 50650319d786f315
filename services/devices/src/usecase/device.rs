use uuid::Uuid;

use iothub_domain::device::DeviceKind;

use crate::domain::repository::DeviceRepository;
use crate::domain::types::Device;
use crate::error::DevicesServiceError;

// ── CreateDevice ─────────────────────────────────────────────────────────────

pub struct CreateDeviceInput {
    pub name: String,
    pub kind: String,
    pub location: String,
    pub unit: String,
}

pub struct CreateDeviceUseCase<D: DeviceRepository> {
    pub devices: D,
}

impl<D: DeviceRepository> CreateDeviceUseCase<D> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: CreateDeviceInput,
    ) -> Result<Device, DevicesServiceError> {
        let kind = DeviceKind::from_str_opt(&input.kind)
            .ok_or(DevicesServiceError::InvalidDeviceKind)?;

        let device = Device::new(owner_id, input.name, kind, input.location, input.unit);
        self.devices.create(&device).await?;
        Ok(device)
    }
}

// ── ListDevices ──────────────────────────────────────────────────────────────

pub struct ListDevicesUseCase<D: DeviceRepository> {
    pub devices: D,
}

impl<D: DeviceRepository> ListDevicesUseCase<D> {
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<Device>, DevicesServiceError> {
        self.devices.list_by_owner(owner_id).await
    }
}

// ── UpdateDevice ─────────────────────────────────────────────────────────────

pub struct UpdateDeviceInput {
    pub name: String,
    pub location: String,
    pub unit: String,
}

/// Owner edit of the descriptive attributes. The projection fields are not
/// reachable from here — only telemetry ingestion touches them.
pub struct UpdateDeviceUseCase<D: DeviceRepository> {
    pub devices: D,
}

impl<D: DeviceRepository> UpdateDeviceUseCase<D> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        device_id: Uuid,
        input: UpdateDeviceInput,
    ) -> Result<Device, DevicesServiceError> {
        let mut device = self
            .devices
            .find_by_id(device_id)
            .await?
            .filter(|d| d.owner_id == owner_id)
            .ok_or(DevicesServiceError::DeviceNotFound)?;

        self.devices
            .update_attrs(device_id, &input.name, &input.location, &input.unit)
            .await?;
        device.name = input.name;
        device.location = input.location;
        device.unit = input.unit;
        Ok(device)
    }
}

// ── GetDevice ────────────────────────────────────────────────────────────────

pub struct GetDeviceUseCase<D: DeviceRepository> {
    pub devices: D,
}

impl<D: DeviceRepository> GetDeviceUseCase<D> {
    /// Owner-scoped lookup. A device owned by someone else is reported as
    /// not found, same as a missing one.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        device_id: Uuid,
    ) -> Result<Device, DevicesServiceError> {
        let device = self
            .devices
            .find_by_id(device_id)
            .await?
            .filter(|d| d.owner_id == owner_id)
            .ok_or(DevicesServiceError::DeviceNotFound)?;
        Ok(device)
    }
}
