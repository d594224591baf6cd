use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::dto::{LoginRequest, RegisteredResponse, TokenResponse},
    auth::services,
    error::AppError,
    state::AppState,
    users::dto::CreateUserRequest,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/registration", post(register))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate().map_err(AppError::Validation)?;
    let response = services::login_user(&state, payload).await?;
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<RegisteredResponse>, AppError> {
    payload
        .validate(&state.config.password)
        .map_err(AppError::Validation)?;
    let response = services::register_user(&state, payload).await?;
    Ok(Json(response))
}
