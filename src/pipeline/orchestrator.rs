use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{self, ContainerSpec};
use crate::docker::Runtime;
use crate::provision;

use super::commands::run_command;
use super::types::{LaunchReport, LaunchedContainer};

/// Locate → parse → ensure networks → ensure volumes → build → run.
///
/// Strictly linear; the first failure ends the launch.
pub fn launch<R: Runtime + ?Sized>(runtime: &R, config_dir: &Path, name: &str) -> Result<LaunchReport> {
    let config_path = config::locate(config_dir, name)?;
    tracing::debug!(path = %config_path.display(), "using configuration");

    let cfg = config::load(&config_path)?;
    let provisioned = provision::ensure_all(runtime, &cfg)?;

    let container = match &cfg.container {
        Some(spec) => Some(start(runtime, spec)?),
        None => {
            tracing::info!(config = name, "no container section; nothing to run");
            None
        }
    };

    Ok(LaunchReport {
        config_path,
        provisioned,
        container,
    })
}

fn start<R: Runtime + ?Sized>(runtime: &R, spec: &ContainerSpec) -> Result<LaunchedContainer> {
    let cmd = run_command(spec);
    let label = spec.name.as_deref().unwrap_or(&spec.image);
    tracing::debug!(command = %cmd.display_line(runtime.program()), "starting container");

    let id = runtime
        .run(&cmd)
        .with_context(|| format!("failed to run container '{label}'"))?;
    tracing::info!(container = label, %id, "container started");

    Ok(LaunchedContainer {
        name: spec.name.clone(),
        image: spec.image.clone(),
        id,
    })
}
