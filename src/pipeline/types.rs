use std::path::PathBuf;

use crate::provision::ProvisionReport;

/// Outcome of a successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub config_path: PathBuf,
    pub provisioned: ProvisionReport,
    /// `None` when the config has no `container` section.
    pub container: Option<LaunchedContainer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedContainer {
    pub name: Option<String>,
    pub image: String,
    /// Runtime stdout, normally the container id.
    pub id: String,
}
