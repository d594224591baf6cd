use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{Claims, JwtKeys};
use crate::error::AppError;
use crate::users::repo_types::Role;

/// Requires a valid bearer token; exposes the decoded identity.
/// Role-gating is opt-in per route: handlers that take `AuthUser` accept
/// any valid token, handlers that take `AdminUser` require `ADMIN`.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

/// Requires a valid bearer token carrying the `ADMIN` role.
#[derive(Debug)]
pub struct AdminUser(pub Claims);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(AppError::unauthorized)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = bearer_token(parts)?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::unauthorized()
        })?;

        Ok(AuthUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if claims.role != Role::Admin {
            warn!(user_id = %claims.user_id, role = %claims.role, "role check failed");
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::users::repo_types::User;
    use axum::http::{Request, StatusCode};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/users/123");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn token_for(state: &AppState, role: Role) -> String {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password: "hash".into(),
            role,
            name: "John".into(),
            birthdate: "20.11.88".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        JwtKeys::from_ref(state).sign(&user).expect("sign")
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "User is not authorized!");
    }

    #[tokio::test]
    async fn wrong_scheme_is_unauthorized() {
        let state = AppState::fake();
        for header in ["Basic abc", "Bearer", "Bearer ", "bearer abc"] {
            let mut parts = parts_with_auth(Some(header));
            let err = AuthUser::from_request_parts(&mut parts, &state)
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED, "{header}");
        }
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Bearer not.a.token"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_passes_auth() {
        let state = AppState::fake();
        let token = token_for(&state, Role::User);
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthUser(claims) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("valid token");
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn user_role_is_forbidden_for_admin_guard() {
        let state = AppState::fake();
        let token = token_for(&state, Role::User);
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Access forbidden!");
    }

    #[tokio::test]
    async fn admin_role_passes_admin_guard() {
        let state = AppState::fake();
        let token = token_for(&state, Role::Admin);
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AdminUser(claims) = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .expect("admin token");
        assert_eq!(claims.role, Role::Admin);
    }
}
