use sea_orm::Database;

use iothub_auth::config::AuthConfig;
use iothub_auth::infra::mailer::SmtpMailer;
use iothub_auth::router::build_router;
use iothub_auth::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    iothub_core::tracing::init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url).await?;
    let mailer = SmtpMailer::from_url(&config.smtp_url, &config.smtp_from)?;

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        mailer,
    };
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "auth service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
