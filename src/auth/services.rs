use axum::extract::FromRef;
use tracing::{info, warn};

use crate::auth::dto::{LoginRequest, RegisteredResponse, TokenResponse};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::events::UserLoginEvent;
use crate::state::AppState;
use crate::users::dto::CreateUserRequest;
use crate::users::repo_types::{Role, User};

/// Credential validation. Existence is checked before any hash
/// comparison, so an unknown email is a clean 404 rather than a fault.
pub async fn validate_user(state: &AppState, payload: &LoginRequest) -> Result<User, AppError> {
    let email = payload.email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !verify_password(&payload.password, &user.password)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::invalid_password());
    }

    Ok(user)
}

/// Login: validate credentials, issue a token, emit the login event.
/// The event is fire-and-forget and never affects the response.
pub async fn login_user(state: &AppState, payload: LoginRequest) -> Result<TokenResponse, AppError> {
    let user = validate_user(state, &payload).await?;

    let keys = JwtKeys::from_ref(state);
    let token = keys.sign(&user).map_err(AppError::Internal)?;

    let events = state.events.clone();
    let event = UserLoginEvent::now(user.id, &user.name, &user.email);
    tokio::spawn(async move {
        if let Err(e) = events.publish_login(event).await {
            warn!(error = %e, "login event publish failed");
        }
    });

    info!(user_id = %user.id, "user logged in");
    Ok(TokenResponse { token })
}

/// Registration: uniqueness check, slow salted hash, create with role
/// forced to `USER` regardless of anything the client sent.
pub async fn register_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> Result<RegisteredResponse, AppError> {
    let email = payload.email.trim().to_lowercase();

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "registration with taken email");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;

    // A concurrent registration can still win the race; User::create maps
    // the unique-violation to the same DuplicateEmail.
    let user = User::create(
        &state.db,
        &email,
        &hash,
        Role::User,
        &payload.name,
        &payload.birthdate,
    )
    .await?;

    info!(user_id = %user.id, "user registered");
    Ok(RegisteredResponse::new())
}
