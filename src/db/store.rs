// The user store the provisioner talks to

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::auth;
use crate::db::{self, NewUser, User};
use crate::error::{DbResultExt, SeedError};

/// Create-or-fetch access to user records keyed by username.
///
/// Implementations own password hashing and persistence; callers only pass
/// plain attributes.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user_exists(&self, username: &str) -> Result<bool, SeedError>;

    async fn create_user(&self, user: NewUser) -> Result<User, SeedError>;

    /// Fails with `SeedError::NotFound` when no such username is stored
    async fn get_user(&self, username: &str) -> Result<User, SeedError>;
}

/// UserStore backed by the SQLite users table
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
    hash_cost: u32,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost factor (MIN_HASH_COST..=31)
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn internal(err: anyhow::Error) -> SeedError {
    SeedError::Database(format!("{:#}", err))
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn user_exists(&self, username: &str) -> Result<bool, SeedError> {
        db::user_exists(&self.pool, username).await.map_err(internal)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, SeedError> {
        auth::validate_username(&user.username)
            .and_then(|_| auth::validate_email(&user.email))
            .and_then(|_| auth::validate_password(&user.password))
            .map_err(|e| SeedError::Validation(e.to_string()))?;

        let password_hash =
            auth::hash_password_with_cost(&user.password, self.hash_cost).map_err(internal)?;

        let created = db::create_user(&self.pool, &user, &password_hash)
            .await
            .db_err(&user.username)?;

        tracing::info!(username = %created.username, id = created.id, role = %created.role, "created user");
        Ok(created)
    }

    async fn get_user(&self, username: &str) -> Result<User, SeedError> {
        db::get_user_by_username(&self.pool, username)
            .await
            .map_err(internal)?
            .ok_or_else(|| SeedError::NotFound(username.to_string()))
    }
}
