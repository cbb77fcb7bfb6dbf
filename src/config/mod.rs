// Per-container YAML configs under ~/.config/docker-run.

mod loader;
mod types;

pub use loader::{LocateError, config_dir, load, locate};
pub use types::{Configuration, ContainerSpec, EnvEntry, NameSet, VolumeMapping};
