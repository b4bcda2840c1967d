// Common test utilities shared across test files

use async_trait::async_trait;
use seed_test_users::db::store::{SqliteUserStore, UserStore};
use seed_test_users::db::{self, NewUser, User};
use seed_test_users::error::SeedError;
use std::collections::HashSet;

/// Set up an in-memory SQLite-backed store for testing
#[allow(dead_code)]
pub async fn setup_test_store() -> SqliteUserStore {
    let pool = db::init_db(db::IN_MEMORY)
        .await
        .expect("Failed to create in-memory database");
    SqliteUserStore::new(pool).with_hash_cost(seed_test_users::auth::MIN_HASH_COST)
}

/// Store that refuses to create the listed usernames; existence checks and
/// fetches can be made to fail per username as well
#[allow(dead_code)]
pub struct FailingStore {
    pub inner: SqliteUserStore,
    pub failing: HashSet<String>,
    pub failing_lookups: HashSet<String>,
    pub failing_fetches: HashSet<String>,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn new(inner: SqliteUserStore, failing: &[&str]) -> Self {
        Self {
            inner,
            failing: failing.iter().map(|u| u.to_string()).collect(),
            failing_lookups: HashSet::new(),
            failing_fetches: HashSet::new(),
        }
    }

    pub fn with_failing_lookups(mut self, usernames: &[&str]) -> Self {
        self.failing_lookups = usernames.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn with_failing_fetches(mut self, usernames: &[&str]) -> Self {
        self.failing_fetches = usernames.iter().map(|u| u.to_string()).collect();
        self
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn user_exists(&self, username: &str) -> Result<bool, SeedError> {
        if self.failing_lookups.contains(username) {
            return Err(SeedError::Database("lookup unavailable".to_string()));
        }
        self.inner.user_exists(username).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, SeedError> {
        if self.failing.contains(&user.username) {
            return Err(SeedError::Database("simulated failure".to_string()));
        }
        self.inner.create_user(user).await
    }

    async fn get_user(&self, username: &str) -> Result<User, SeedError> {
        if self.failing_fetches.contains(username) {
            return Err(SeedError::Database("fetch unavailable".to_string()));
        }
        self.inner.get_user(username).await
    }
}

/// Captured stdout of a seeding run
#[allow(dead_code)]
pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("output is UTF-8")
}
