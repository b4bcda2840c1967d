// Error handling for the user store

use std::fmt;

/// Failures the user store reports back to the provisioner
#[derive(Debug)]
pub enum SeedError {
    NotFound(String),
    Duplicate(String),
    Validation(String),
    Database(String),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::NotFound(username) => write!(f, "User '{}' does not exist", username),
            SeedError::Duplicate(username) => write!(f, "User '{}' already exists", username),
            SeedError::Validation(msg) => write!(f, "Validation error: {}", msg),
            SeedError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for SeedError {}

// Extension trait for database result handling
pub trait DbResultExt<T> {
    /// Convert database errors to SeedError::Database, mapping UNIQUE violations to Duplicate
    fn db_err(self, username: &str) -> Result<T, SeedError>;
}

impl<T> DbResultExt<T> for Result<T, sqlx::Error> {
    fn db_err(self, username: &str) -> Result<T, SeedError> {
        self.map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                SeedError::Duplicate(username.to_string())
            }
            _ => SeedError::Database(e.to_string()),
        })
    }
}
