// Password hashing and account field validation

use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

// Lowest cost bcrypt accepts
pub const MIN_HASH_COST: u32 = 4;

// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    hash(password, cost).context("Failed to hash password")
}

// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    verify(password, hash).context("Failed to verify password")
}

// Validate username format
pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < 3 {
        anyhow::bail!("Username must be at least 3 characters");
    }
    if username.len() > 30 {
        anyhow::bail!("Username must be at most 30 characters");
    }
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        anyhow::bail!("Username can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

// Validate email shape (local@domain)
pub fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        anyhow::bail!("Email must contain '@'");
    };
    if local.is_empty() || domain.is_empty() {
        anyhow::bail!("Email must have text on both sides of '@'");
    }
    if email.chars().any(char::is_whitespace) {
        anyhow::bail!("Email cannot contain whitespace");
    }
    Ok(())
}

// Test accounts use short passwords, so only emptiness is rejected
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    if password.len() > 72 {
        anyhow::bail!("Password must be at most 72 bytes");
    }
    Ok(())
}
