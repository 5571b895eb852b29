//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    full_name: String,
    email: String,
    password_hash: String,
    role: String,
    is_verified: bool,
    verification_code: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.user_id),
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            is_verified: row.is_verified,
            verification_code: row.verification_code,
            verification_expires_at: row.verification_expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "user_id, full_name, email, password_hash, role, is_verified, \
     verification_code, verification_expires_at, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (
                full_name, email, password_hash, role, verification_code, verification_expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.verification_code)
        .bind(user.verification_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        format!("email {} already registered", user.email),
                    );
                }
            }
            DomainError::database("Failed to create user", e)
        })?;

        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find user", e))?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find user", e))?;

        Ok(row.map(User::from))
    }

    async fn consume_verification_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        // Single statement: concurrent requests with the same code cannot both match.
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                is_verified = TRUE,
                verification_code = NULL,
                verification_expires_at = NULL,
                updated_at = $2
            WHERE verification_code = $1
              AND is_verified = FALSE
              AND verification_expires_at > $2
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(code)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to verify email", e))?;

        Ok(row.map(User::from))
    }
}
