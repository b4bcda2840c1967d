pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use anyhow::Result;
use std::io::Write;

use config::{accounts, Settings};
use db::seed::SeedReport;
use db::store::SqliteUserStore;

/// Open the configured database and provision the test accounts.
///
/// Errors are only returned for bootstrap failures (unreadable accounts file,
/// unusable database, closed output). Failures creating individual accounts
/// are printed to `out` and recorded in the report.
pub async fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<SeedReport> {
    let batches = accounts::load_batches(settings.accounts.as_deref())?;

    let pool = db::init_db(&settings.database).await?;
    let store = SqliteUserStore::new(pool.clone());

    let report = db::seed::seed_accounts(&store, &batches, out).await;
    pool.close().await;

    report
}
