use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::db::{NewUser, Role};

pub const DEFAULT_DEPARTMENT: &str = "Producción";

/// One test account, as written in an accounts file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountSpec {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl AccountSpec {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            department: self.department.clone(),
        }
    }
}

/// Accounts provisioned under one error boundary.
///
/// `label` names the batch in its failure line. A `detailed` batch prints
/// every field of a newly created account; otherwise a single line is printed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeedBatch {
    pub label: String,
    #[serde(default)]
    pub detailed: bool,
    pub accounts: Vec<AccountSpec>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct AccountsFile {
    pub batches: Vec<SeedBatch>,
}

fn account(
    username: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
    department: Option<&str>,
) -> AccountSpec {
    AccountSpec {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: password.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role,
        department: department.map(str::to_string),
    }
}

/// The admin batch followed by the supervisor and employee batch
pub fn default_batches() -> Vec<SeedBatch> {
    vec![
        SeedBatch {
            label: "usuario".to_string(),
            detailed: true,
            accounts: vec![account("admin", "admin123", "Admin", "User", Role::Admin, None)],
        },
        SeedBatch {
            label: "usuarios adicionales".to_string(),
            detailed: false,
            accounts: vec![
                account(
                    "supervisor",
                    "super123",
                    "Supervisor",
                    "Test",
                    Role::Supervisor,
                    Some(DEFAULT_DEPARTMENT),
                ),
                account(
                    "employee",
                    "emp123",
                    "Empleado",
                    "Test",
                    Role::Employee,
                    Some(DEFAULT_DEPARTMENT),
                ),
            ],
        },
    ]
}

/// Parse batches from YAML and reject empty or ambiguous plans
pub fn parse_batches(yaml: &str) -> Result<Vec<SeedBatch>> {
    let file: AccountsFile = serde_yaml::from_str(yaml).context("Invalid accounts file")?;

    if file.batches.iter().all(|batch| batch.accounts.is_empty()) {
        anyhow::bail!("Accounts file does not define any account");
    }

    let mut seen = HashSet::new();
    for spec in file.batches.iter().flat_map(|batch| &batch.accounts) {
        if !seen.insert(spec.username.as_str()) {
            anyhow::bail!("Duplicate username in accounts file: {}", spec.username);
        }
    }

    Ok(file.batches)
}

/// Load batches from `path`, or fall back to the built-in accounts
pub fn load_batches(path: Option<&Path>) -> Result<Vec<SeedBatch>> {
    match path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read accounts file {}", path.display()))?;
            parse_batches(&yaml)
        }
        None => Ok(default_batches()),
    }
}
