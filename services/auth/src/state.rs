use sea_orm::DatabaseConnection;

use iothub_auth_types::bearer::JwtSecretSource;
use iothub_core::health::DbSource;

use crate::infra::db::{DbOtpRepository, DbUserRepository};
use crate::infra::mailer::SmtpMailer;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub mailer: SmtpMailer,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
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
