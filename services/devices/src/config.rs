/// Devices service configuration loaded from environment variables.
#[derive(Debug)]
pub struct DevicesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for validating session tokens. Must match the auth
    /// service's signing secret.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3102). Env var: `DEVICES_PORT`.
    pub devices_port: u16,
}

impl DevicesConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            devices_port: std::env::var("DEVICES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3102),
        }
    }
}
