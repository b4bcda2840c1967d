// Provisioning of the test accounts

use anyhow::Result;
use std::io::Write;

use crate::config::accounts::{AccountSpec, SeedBatch};
use crate::db::store::UserStore;
use crate::db::User;
use crate::error::SeedError;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(User),
    Existing(User),
    Failed(String),
    /// An earlier account in the same batch failed
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountReport {
    pub username: String,
    pub outcome: Outcome,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeedReport {
    pub accounts: Vec<AccountReport>,
}

impl SeedReport {
    pub fn outcome(&self, username: &str) -> Option<&Outcome> {
        self.accounts
            .iter()
            .find(|report| report.username == username)
            .map(|report| &report.outcome)
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created(_)))
    }

    pub fn existing(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Existing(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_) | Outcome::Skipped))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.accounts.iter().filter(|r| pred(&r.outcome)).count()
    }

    fn push(&mut self, spec: &AccountSpec, outcome: Outcome) {
        self.accounts.push(AccountReport {
            username: spec.username.clone(),
            outcome,
        });
    }
}

enum Provisioned {
    Created(User),
    Existing(User),
}

async fn provision_account<S>(store: &S, spec: &AccountSpec) -> Result<Provisioned, SeedError>
where
    S: UserStore + ?Sized,
{
    if store.user_exists(&spec.username).await? {
        let user = store.get_user(&spec.username).await?;
        tracing::info!(username = %user.username, "user already exists");
        return Ok(Provisioned::Existing(user));
    }

    store.create_user(spec.to_new_user()).await.map(Provisioned::Created)
}

fn write_existing<W: Write>(out: &mut W, user: &User) -> std::io::Result<()> {
    writeln!(out, "❌ El usuario '{}' ya existe", user.username)?;
    writeln!(
        out,
        "✅ Usuario existente: {} - {} - Role: {}",
        user.username, user.email, user.role
    )
}

fn write_created<W: Write>(out: &mut W, user: &User, spec: &AccountSpec) -> std::io::Result<()> {
    writeln!(out, "✅ Usuario creado exitosamente:")?;
    writeln!(out, "   Username: {}", user.username)?;
    writeln!(out, "   Email: {}", user.email)?;
    writeln!(out, "   Password: {}", spec.password)?;
    writeln!(out, "   Role: {}", user.role)
}

/// Provision one batch; the first failure ends it and skips the rest
async fn seed_batch<S, W>(
    store: &S,
    batch: &SeedBatch,
    out: &mut W,
    report: &mut SeedReport,
) -> Result<()>
where
    S: UserStore + ?Sized,
    W: Write,
{
    let mut accounts = batch.accounts.iter().enumerate();

    while let Some((index, spec)) = accounts.next() {
        match provision_account(store, spec).await {
            Ok(Provisioned::Existing(user)) => {
                write_existing(out, &user)?;
                report.push(spec, Outcome::Existing(user));
            }
            Ok(Provisioned::Created(user)) => {
                if batch.detailed {
                    write_created(out, &user, spec)?;
                } else {
                    // Only the batch's leading account is set off by a blank line
                    if index == 0 {
                        writeln!(out)?;
                    }
                    writeln!(
                        out,
                        "✅ {} creado: {} - Password: {}",
                        user.role.localized_label(),
                        user.username,
                        spec.password
                    )?;
                }
                report.push(spec, Outcome::Created(user));
            }
            Err(e) => {
                tracing::warn!(batch = %batch.label, username = %spec.username, error = %e, "provisioning failed");
                writeln!(out, "❌ Error al crear {}: {}", batch.label, e)?;
                report.push(spec, Outcome::Failed(e.to_string()));
                for (_, skipped) in accounts.by_ref() {
                    report.push(skipped, Outcome::Skipped);
                }
            }
        }
    }

    Ok(())
}

/// Print the fixed credential summary for every configured account
pub fn write_credentials<W: Write>(out: &mut W, batches: &[SeedBatch]) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "CREDENCIALES DE PRUEBA:")?;
    writeln!(out, "{}", rule)?;
    for spec in batches.iter().flat_map(|batch| &batch.accounts) {
        let heading = format!("{}:", spec.role.label());
        writeln!(out, "{:<12}{} / {}", heading, spec.username, spec.password)?;
    }
    writeln!(out, "{}", rule)
}

/// Provision every batch in order, then print the credential summary.
///
/// Store failures never abort the run: they are printed and recorded in the
/// report. Only failures writing to `out` are returned as errors.
pub async fn seed_accounts<S, W>(store: &S, batches: &[SeedBatch], out: &mut W) -> Result<SeedReport>
where
    S: UserStore + ?Sized,
    W: Write,
{
    let mut report = SeedReport::default();

    for batch in batches {
        seed_batch(store, batch, out, &mut report).await?;
    }

    write_credentials(out, batches)?;

    tracing::info!(
        created = report.created(),
        existing = report.existing(),
        failed = report.failed(),
        "seeding finished"
    );

    Ok(report)
}
