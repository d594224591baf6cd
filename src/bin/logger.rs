//! The logging collaborator: receives fire-and-forget login events from
//! the main app and writes them to its own log. No acknowledgement
//! contract beyond the HTTP status, no retries, no storage.

use std::net::SocketAddr;

use axum::{routing::post, Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use userhub::events::UserLoginEvent;

async fn log_user(Json(event): Json<UserLoginEvent>) {
    info!(
        user_id = %event.user.id,
        name = %event.user.name,
        email = %event.user.email,
        login_date = %event.login_date,
        "user login event"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "logger=info,tower_http=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let app = Router::new()
        .route("/events/log-user", post(log_user))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("LOGGER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("LOGGER_PORT").unwrap_or_else(|_| "5001".into())
    )
    .parse()?;

    info!("logger service listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
