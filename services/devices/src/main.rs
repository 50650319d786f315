use sea_orm::Database;

use iothub_devices::config::DevicesConfig;
use iothub_devices::router::build_router;
use iothub_devices::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    iothub_core::tracing::init_tracing();

    let config = DevicesConfig::from_env();

    let db = Database::connect(&config.database_url).await?;

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
    };
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.devices_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "devices service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
