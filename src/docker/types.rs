use std::fmt;

use thiserror::Error;

/// Runtime-managed resources that a config can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Network,
    Volume,
}

impl ResourceKind {
    /// The runtime subcommand for this kind (`docker network ...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::Volume => "volume",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `run` invocation. `args` is the full argument list passed to the
/// runtime binary; nothing goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub args: Vec<String>,
}

impl RunCommand {
    /// Shell-quoted rendering for debug logs. Contains environment values, so
    /// it never goes into an error message.
    pub fn display_line(&self, program: &str) -> String {
        command_line(program, &self.args)
    }
}

/// `program args...` joined with shell quoting where a word needs it.
pub fn command_line(program: &str, args: &[String]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(program);
    words.extend(args.iter().map(String::as_str));
    shell_words::join(words)
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to invoke `{program}` (is it installed and on PATH?)")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {}: {stderr}", exit_label(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}
