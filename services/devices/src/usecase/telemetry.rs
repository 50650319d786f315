use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::{DeviceRepository, TelemetryRepository};
use crate::domain::types::{DEFAULT_HISTORY_HOURS, Device, Reading};
use crate::error::DevicesServiceError;

// ── RecordReading ────────────────────────────────────────────────────────────

pub struct RecordReadingInput {
    pub device_id: Uuid,
    pub value: f64,
}

/// Append a reading to the log and refresh the owning device's projection,
/// handing back the device as committed so the caller observes the new
/// `current_value`/`status`/`last_updated` in the same round trip.
///
/// The append and the projection update commit together or not at all, so
/// the projection can never reference a reading the log does not have.
pub struct RecordReadingUseCase<D: DeviceRepository, T: TelemetryRepository> {
    pub devices: D,
    pub telemetry: T,
}

impl<D: DeviceRepository, T: TelemetryRepository> RecordReadingUseCase<D, T> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: RecordReadingInput,
    ) -> Result<Device, DevicesServiceError> {
        // Non-owners get the same answer as a missing device.
        self.devices
            .find_by_id(input.device_id)
            .await?
            .filter(|d| d.owner_id == owner_id)
            .ok_or(DevicesServiceError::DeviceNotFound)?;

        let reading = Reading {
            id: Uuid::new_v4(),
            device_id: input.device_id,
            value: input.value,
            captured_at: Utc::now(),
        };
        self.telemetry.record(&reading).await
    }
}

// ── History ──────────────────────────────────────────────────────────────────

pub struct HistoryInput {
    pub device_id: Uuid,
    /// Window size in hours; `None` means the 24-hour default.
    pub hours: Option<i64>,
}

pub struct HistoryUseCase<D: DeviceRepository, T: TelemetryRepository> {
    pub devices: D,
    pub telemetry: T,
}

impl<D: DeviceRepository, T: TelemetryRepository> HistoryUseCase<D, T> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: HistoryInput,
    ) -> Result<Vec<Reading>, DevicesServiceError> {
        self.devices
            .find_by_id(input.device_id)
            .await?
            .filter(|d| d.owner_id == owner_id)
            .ok_or(DevicesServiceError::DeviceNotFound)?;

        // The window is client-supplied; a value too large for chrono
        // degrades to "everything" instead of overflowing.
        let hours = input.hours.unwrap_or(DEFAULT_HISTORY_HOURS).max(0);
        let since = Duration::try_hours(hours)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.telemetry.history_since(input.device_id, since).await
    }
}
