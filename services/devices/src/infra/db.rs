use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use iothub_devices_schema::{devices, readings};
use iothub_domain::device::{DeviceKind, DeviceStatus};

use crate::domain::repository::{DeviceRepository, TelemetryRepository};
use crate::domain::types::{Device, Reading};
use crate::error::DevicesServiceError;

// ── Device repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeviceRepository {
    pub db: DatabaseConnection,
}

impl DeviceRepository for DbDeviceRepository {
    async fn create(&self, device: &Device) -> Result<(), DevicesServiceError> {
        devices::ActiveModel {
            id: Set(device.id),
            owner_id: Set(device.owner_id),
            name: Set(device.name.clone()),
            kind: Set(device.kind.as_str().to_owned()),
            location: Set(device.location.clone()),
            unit: Set(device.unit.clone()),
            status: Set(device.status.as_str().to_owned()),
            current_value: Set(device.current_value),
            last_updated: Set(device.last_updated),
            created_at: Set(device.created_at),
        }
        .insert(&self.db)
        .await
        .context("create device")?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DevicesServiceError> {
        let models = devices::Entity::find()
            .filter(devices::Column::OwnerId.eq(owner_id))
            .order_by_desc(devices::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list devices by owner")?;
        models.into_iter().map(device_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>, DevicesServiceError> {
        let model = devices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find device by id")?;
        model.map(device_from_model).transpose()
    }

    async fn update_attrs(
        &self,
        id: Uuid,
        name: &str,
        location: &str,
        unit: &str,
    ) -> Result<(), DevicesServiceError> {
        devices::ActiveModel {
            id: Set(id),
            name: Set(name.to_owned()),
            location: Set(location.to_owned()),
            unit: Set(unit.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update device attrs")?;
        Ok(())
    }
}

fn device_from_model(model: devices::Model) -> Result<Device, DevicesServiceError> {
    // A row with an unparsable kind or status means the table was written
    // outside this service; surface it as a 500 rather than guessing.
    let kind = DeviceKind::from_str_opt(&model.kind)
        .with_context(|| format!("unknown device kind in storage: {}", model.kind))?;
    let status = DeviceStatus::from_str_opt(&model.status)
        .with_context(|| format!("unknown device status in storage: {}", model.status))?;
    Ok(Device {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        kind,
        location: model.location,
        unit: model.unit,
        status,
        current_value: model.current_value,
        last_updated: model.last_updated,
        created_at: model.created_at,
    })
}

// ── Telemetry repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTelemetryRepository {
    pub db: DatabaseConnection,
}

impl TelemetryRepository for DbTelemetryRepository {
    async fn record(&self, reading: &Reading) -> Result<Device, DevicesServiceError> {
        let model = self
            .db
            .transaction::<_, devices::Model, sea_orm::DbErr>(|txn| {
                let reading = reading.clone();
                Box::pin(async move {
                    readings::ActiveModel {
                        id: Set(reading.id),
                        device_id: Set(reading.device_id),
                        value: Set(reading.value),
                        captured_at: Set(reading.captured_at),
                    }
                    .insert(txn)
                    .await?;

                    // The `last_updated <= captured_at` filter keeps a stale
                    // writer from rolling the projection backwards; its
                    // reading still lands in the log above.
                    devices::Entity::update_many()
                        .col_expr(devices::Column::CurrentValue, Expr::value(reading.value))
                        .col_expr(
                            devices::Column::Status,
                            Expr::value(DeviceStatus::Online.as_str()),
                        )
                        .col_expr(
                            devices::Column::LastUpdated,
                            Expr::value(reading.captured_at),
                        )
                        .filter(devices::Column::Id.eq(reading.device_id))
                        .filter(devices::Column::LastUpdated.lte(reading.captured_at))
                        .exec(txn)
                        .await?;

                    // Re-read inside the transaction so the caller sees the
                    // projection exactly as committed.
                    devices::Entity::find_by_id(reading.device_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("device".to_owned()))
                })
            })
            .await
            .context("record reading")?;
        device_from_model(model)
    }

    async fn history_since(
        &self,
        device_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Reading>, DevicesServiceError> {
        let models = readings::Entity::find()
            .filter(readings::Column::DeviceId.eq(device_id))
            .filter(readings::Column::CapturedAt.gte(since))
            .order_by_asc(readings::Column::CapturedAt)
            .all(&self.db)
            .await
            .context("load reading history")?;
        Ok(models
            .into_iter()
            .map(|m| Reading {
                id: m.id,
                device_id: m.device_id,
                value: m.value,
                captured_at: m.captured_at,
            })
            .collect())
    }
}
