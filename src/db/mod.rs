// Database module for the users table

pub mod seed;
pub mod store;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::{fmt, str::FromStr};

pub const IN_MEMORY: &str = ":memory:";

// Open the database and run migrations
pub async fn init_db(db_path: &str) -> Result<SqlitePool> {
    let pool = if db_path == IN_MEMORY {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Every connection to :memory: is a separate database, so keep exactly one
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?
    } else {
        // Plain filename, so '?' and '#' are never read as URL syntax
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", db_path))?
    };

    let migration_sql = include_str!("../../migrations/001_create_users.sql");
    sqlx::query(migration_sql)
        .execute(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::debug!(db_path, "database ready");

    Ok(pool)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Employee => "employee",
        }
    }

    /// Heading used in the credential summary
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Supervisor => "Supervisor",
            Role::Employee => "Employee",
        }
    }

    /// Name shown in the Spanish status lines
    pub fn localized_label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Supervisor => "Supervisor",
            Role::Employee => "Empleado",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "supervisor" => Ok(Role::Supervisor),
            "employee" => Ok(Role::Employee),
            other => anyhow::bail!("Unknown role: {}", other),
        }
    }
}

// User models
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            role: role.parse().map_err(|e: anyhow::Error| sqlx::Error::Decode(e.into()))?,
            department: row.try_get("department")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Attributes for a user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: Option<String>,
}

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, role, department, \
     is_active, created_at, updated_at";

// Check whether a username is taken
pub async fn user_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

// Insert a user row; the caller supplies an already hashed password
pub async fn create_user(pool: &SqlitePool, user: &NewUser, password_hash: &str) -> Result<User, sqlx::Error> {
    let row = sqlx::query(&format!(
        "INSERT INTO users (username, email, password_hash, first_name, last_name, role, department)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&user.username)
    .bind(&user.email)
    .bind(password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.role.as_str())
    .bind(&user.department)
    .fetch_one(pool)
    .await?;

    User::from_row(&row)
}

// Find user by username
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS))
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(User::from_row).transpose()?)
}

// Fetch the stored hash for a username
pub async fn get_password_hash(pool: &SqlitePool, username: &str) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

// List all users, oldest first
pub async fn list_all_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(User::from_row).collect::<Result<_, _>>()?)
}
