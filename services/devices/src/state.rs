use sea_orm::DatabaseConnection;

use iothub_auth_types::bearer::JwtSecretSource;
use iothub_core::health::DbSource;

use crate::infra::db::{DbDeviceRepository, DbTelemetryRepository};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn device_repo(&self) -> DbDeviceRepository {
        DbDeviceRepository {
            db: self.db.clone(),
        }
    }

    pub fn telemetry_repo(&self) -> DbTelemetryRepository {
        DbTelemetryRepository {
            db: self.db.clone(),
        }
    }
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl DbSource for AppState {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
