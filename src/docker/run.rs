use std::process::{Command, Stdio};

use super::types::{RuntimeError, command_line};

/// Run `program args...` to completion, capturing both streams.
///
/// Returns the trimmed stdout on a zero exit. Any other exit becomes
/// [`RuntimeError::Failed`] with the captured stderr; the arguments stay out
/// of the error and are only logged at debug level. Blocks until the child
/// exits; there is no timeout.
pub fn exec(program: &str, args: &[String]) -> Result<String, RuntimeError> {
    let command = command_line(program, args);
    tracing::debug!(%command, "invoking runtime");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| RuntimeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(%command, code = ?output.status.code(), %stderr, "runtime command failed");
        return Err(RuntimeError::Failed {
            program: program.to_string(),
            code: output.status.code(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
