use super::run::exec;
use super::types::{ResourceKind, RunCommand, RuntimeError};

/// Env var selecting the runtime binary.
pub const RUNTIME_ENV: &str = "DOCKER_RUN_RUNTIME";
pub const DEFAULT_RUNTIME: &str = "docker";

/// The operations this tool needs from a container runtime.
pub trait Runtime {
    /// Names of every existing resource of `kind`.
    fn list(&self, kind: ResourceKind) -> Result<Vec<String>, RuntimeError>;

    fn create(&self, kind: ResourceKind, name: &str) -> Result<(), RuntimeError>;

    /// Start the container detached. Returns whatever the runtime printed on
    /// stdout, normally the container id.
    fn run(&self, cmd: &RunCommand) -> Result<String, RuntimeError>;

    /// Program name used when rendering commands for humans.
    fn program(&self) -> &str;
}

/// A runtime driven through its command-line interface (`docker`, `podman`).
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Honour `DOCKER_RUN_RUNTIME`, falling back to `docker`.
    pub fn from_env() -> Self {
        match std::env::var(RUNTIME_ENV) {
            Ok(program) if !program.trim().is_empty() => Self::new(program.trim()),
            _ => Self::new(DEFAULT_RUNTIME),
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl Runtime for DockerCli {
    fn list(&self, kind: ResourceKind) -> Result<Vec<String>, RuntimeError> {
        let args = [kind.as_str(), "ls", "--format", "{{.Name}}"].map(String::from);
        let stdout = exec(&self.program, &args)?;
        Ok(parse_names(&stdout))
    }

    fn create(&self, kind: ResourceKind, name: &str) -> Result<(), RuntimeError> {
        let args = [kind.as_str(), "create", name].map(String::from);
        exec(&self.program, &args).map(|_| ())
    }

    fn run(&self, cmd: &RunCommand) -> Result<String, RuntimeError> {
        exec(&self.program, &cmd.args)
    }

    fn program(&self) -> &str {
        &self.program
    }
}

/// One name per line, as printed by `ls --format {{.Name}}`.
pub fn parse_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
