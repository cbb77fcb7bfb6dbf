//! Check-then-create for the networks and volumes a config declares.
//!
//! Nothing is rolled back: when a creation fails, resources created earlier in
//! the same run stay in place. Every step is idempotent, so rerunning after
//! fixing the cause picks up where the failed run stopped.

use anyhow::{Context, Result};

use crate::config::Configuration;
use crate::docker::{ResourceKind, Runtime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    Existing,
    Created,
}

/// What a provisioning pass found and did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub created: Vec<(ResourceKind, String)>,
    pub existing: Vec<(ResourceKind, String)>,
}

impl ProvisionReport {
    fn record(&mut self, kind: ResourceKind, name: &str, outcome: Ensured) {
        let entry = (kind, name.to_string());
        match outcome {
            Ensured::Created => self.created.push(entry),
            Ensured::Existing => self.existing.push(entry),
        }
    }
}

/// Whether a resource called `name` exists. A failing query is an error, not
/// "absent".
pub fn exists<R: Runtime + ?Sized>(runtime: &R, kind: ResourceKind, name: &str) -> Result<bool> {
    let names = runtime
        .list(kind)
        .with_context(|| format!("failed to query existing {kind}s"))?;
    Ok(names.iter().any(|n| n == name))
}

/// Create `name` unless it already exists.
pub fn ensure<R: Runtime + ?Sized>(runtime: &R, kind: ResourceKind, name: &str) -> Result<Ensured> {
    if exists(runtime, kind, name)? {
        tracing::debug!(%kind, name, "already exists");
        return Ok(Ensured::Existing);
    }

    runtime
        .create(kind, name)
        .with_context(|| format!("failed to create {kind} '{name}'"))?;
    tracing::info!(%kind, name, "created");
    Ok(Ensured::Created)
}

/// Ensure every declared network, then every declared volume.
pub fn ensure_all<R: Runtime + ?Sized>(runtime: &R, config: &Configuration) -> Result<ProvisionReport> {
    let mut report = ProvisionReport::default();

    let declared = config
        .networks
        .iter()
        .map(|n| (ResourceKind::Network, n))
        .chain(config.volumes.iter().map(|v| (ResourceKind::Volume, v)));

    for (kind, name) in declared {
        let outcome = ensure(runtime, kind, name)?;
        report.record(kind, name, outcome);
    }

    Ok(report)
}
