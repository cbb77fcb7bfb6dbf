// Container runtime access: resource listing/creation and container launch.

pub mod engine;
#[cfg(test)]
pub mod fake;
pub mod run;
pub mod types;

pub use engine::{DEFAULT_RUNTIME, DockerCli, RUNTIME_ENV, Runtime, parse_names};
pub use run::exec;
pub use types::{ResourceKind, RunCommand, RuntimeError, command_line};
