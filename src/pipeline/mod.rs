pub mod commands;
pub mod orchestrator;
mod types;

pub use commands::run_command;
pub use orchestrator::launch;
pub use types::{LaunchReport, LaunchedContainer};
