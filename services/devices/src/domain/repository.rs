#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Device, Reading};
use crate::error::DevicesServiceError;

/// Repository for device registrations and their projections.
pub trait DeviceRepository: Send + Sync {
    async fn create(&self, device: &Device) -> Result<(), DevicesServiceError>;

    /// All devices owned by the identity, newest registration first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DevicesServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>, DevicesServiceError>;

    /// Owner-editable attributes only; projection columns are off limits
    /// to everything except telemetry ingestion.
    async fn update_attrs(
        &self,
        id: Uuid,
        name: &str,
        location: &str,
        unit: &str,
    ) -> Result<(), DevicesServiceError>;
}

/// Repository for the append-only reading log and the projection it drives.
pub trait TelemetryRepository: Send + Sync {
    /// Append the reading and refresh the device projection in one
    /// transaction, returning the device as it stands after the write.
    /// The projection update is guarded by `last_updated <= captured_at`
    /// so a stale writer never rolls the projection backwards; the reading
    /// itself is appended regardless.
    async fn record(&self, reading: &Reading) -> Result<Device, DevicesServiceError>;

    /// Readings with `captured_at >= since`, ascending by capture time.
    async fn history_since(
        &self,
        device_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Reading>, DevicesServiceError>;
}
