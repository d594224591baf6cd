use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    auth::password::hash_password,
    error::AppError,
    state::AppState,
    users::dto::{CreateUserRequest, UpdateUserRequest},
    users::repo_types::{Role, User},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
        .route("/users/:id", put(update_user))
        .route("/users/:id", delete(delete_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload
        .validate(&state.config.password)
        .map_err(AppError::Validation)?;
    let email = payload.email.trim().to_lowercase();

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &email,
        &hash,
        Role::User,
        &payload.name,
        &payload.birthdate,
    )
    .await?;

    info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = User::find_by_id(&state.db, id).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    payload.validate().map_err(AppError::Validation)?;

    let user = User::update(&state.db, id, &payload.name, &payload.birthdate).await?;
    info!(user_id = %user.id, admin_id = %claims.user_id, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = User::delete(&state.db, id).await?;
    info!(user_id = %user.id, caller_id = %claims.user_id, "user deleted");
    Ok(Json(user))
}
