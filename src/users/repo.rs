use crate::error::AppError;
use crate::users::repo_types::{Role, User};
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, role, name, birthdate, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by id; misses surface as `UserNotFound`.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, role, name, birthdate, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        user.ok_or(AppError::UserNotFound)
    }

    pub async fn list_all(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, role, name, birthdate, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Insert a new user. A unique-violation on email (a registration race
    /// that got past the pre-check) surfaces as `DuplicateEmail`.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        role: Role,
        name: &str,
        birthdate: &str,
    ) -> Result<User, AppError> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, role, name, birthdate)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password, role, name, birthdate, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(name)
        .bind(birthdate)
        .fetch_one(db)
        .await;

        match res {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                Err(AppError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Update the mutable fields. Email, password and role are not
    /// reachable through this path.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        birthdate: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, birthdate = $3
            WHERE id = $1
            RETURNING id, email, password, role, name, birthdate, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(birthdate)
        .fetch_optional(db)
        .await?;
        user.ok_or(AppError::UserNotFound)
    }

    /// Delete a user, returning the removed record.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, email, password, role, name, birthdate, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        user.ok_or(AppError::UserNotFound)
    }
}
