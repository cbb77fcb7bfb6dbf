use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::types::Configuration;

const EXTENSIONS: [&str; 2] = ["yml", "yaml"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("HOME is not set; cannot locate the configuration directory")]
    NoHome,
    #[error("No configuration file found for {name} in {}.", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error(
        "Multiple configuration files found for {name} in {}: {}",
        .dir.display(),
        join_paths(.matches)
    )]
    Ambiguous {
        name: String,
        dir: PathBuf,
        matches: Vec<PathBuf>,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `<HOME>/.config/docker-run`.
pub fn config_dir() -> Result<PathBuf, LocateError> {
    config_dir_from(std::env::var_os("HOME").map(PathBuf::from))
}

fn config_dir_from(home: Option<PathBuf>) -> Result<PathBuf, LocateError> {
    match home {
        Some(home) if !home.as_os_str().is_empty() => Ok(home.join(".config").join("docker-run")),
        _ => Err(LocateError::NoHome),
    }
}

/// Resolve `name` to exactly one `<name>.yml` / `<name>.yaml` inside `dir`.
pub fn locate(dir: &Path, name: &str) -> Result<PathBuf, LocateError> {
    let not_found = || LocateError::NotFound {
        name: name.to_string(),
        dir: dir.to_path_buf(),
    };

    // A name with separators would escape the config directory.
    if name.trim().is_empty() || name.contains(['/', '\\']) {
        return Err(not_found());
    }

    let mut matches: Vec<PathBuf> = EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .filter(|p| p.is_file())
        .collect();

    if matches.len() > 1 {
        return Err(LocateError::Ambiguous {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            matches,
        });
    }
    matches.pop().ok_or_else(not_found)
}

/// Read and parse a configuration file. An empty document (blank, `---` or
/// only comments) is a valid configuration with every section absent.
pub fn load(path: &Path) -> Result<Configuration> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Option<Configuration> = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to load YAML configuration {}", path.display()))?;
    Ok(config.unwrap_or_default())
}
