// Command line and environment configuration

pub mod accounts;

use clap::Arg;
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_DATABASE: &str = "fatigue_detection.db";
pub const DATABASE_ENV: &str = "FATIGUE_DB";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: String,
    pub accounts: Option<PathBuf>,
}

fn command() -> clap::Command {
    clap::Command::new("seed-test-users")
        .about("Create the admin, supervisor and employee test accounts")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("DATABASE")
                .help("Path to SQLite database file (falls back to $FATIGUE_DB)"),
        )
        .arg(
            Arg::new("accounts")
                .short('a')
                .long("accounts")
                .value_name("ACCOUNTS")
                .help("Path to a YAML file replacing the built-in test accounts"),
        )
}

impl Settings {
    pub fn from_cli() -> Self {
        Self::resolve(command().get_matches(), std::env::var(DATABASE_ENV).ok())
    }

    /// Parse explicit arguments; `env_database` stands in for $FATIGUE_DB
    pub fn try_from_args<I, T>(args: I, env_database: Option<String>) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::resolve(command().try_get_matches_from(args)?, env_database))
    }

    fn resolve(matches: clap::ArgMatches, env_database: Option<String>) -> Self {
        let database = matches
            .get_one::<String>("database")
            .cloned()
            .or(env_database.filter(|db| !db.is_empty()))
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let accounts = matches.get_one::<String>("accounts").map(PathBuf::from);

        Settings { database, accounts }
    }
}
