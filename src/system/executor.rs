// src/system/executor.rs

//! Runs the build tool and reports how it exited.

use crate::models::ForwardInvocation;
use std::io::ErrorKind;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

/// Failures to start or wait for the build tool. Its own non-zero exit is not one.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The program does not exist or is not on `PATH`.
    #[error(
        "Build tool '{0}' was not found. \
         Install the .NET SDK or point TEST3_BUILD_TOOL at an MSBuild command."
    )]
    ToolNotFound(String),
    /// Spawning or waiting failed for another reason.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, #[source] std::io::Error),
}

/// Runs the build tool in the foreground and returns its exit code.
///
/// Stdio is inherited, so the tool's output streams straight to the terminal. The call
/// blocks until the child exits. A non-zero exit is not an error here: the code is the
/// result.
pub fn forward(invocation: &ForwardInvocation) -> Result<i32, ExecutionError> {
    let clean_cwd = dunce::simplified(&invocation.cwd);
    log::debug!(
        "Spawning '{}' in '{}'",
        invocation.command_line(),
        clean_cwd.display()
    );

    let mut child = StdCommand::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(clean_cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExecutionError::ToolNotFound(invocation.program.clone()),
            _ => ExecutionError::CommandFailed(invocation.command_line(), e),
        })?;

    let status = child
        .wait()
        .map_err(|e| ExecutionError::CommandFailed(invocation.command_line(), e))?;

    let code = exit_code(status);
    log::debug!("Build tool exited with {} (code {})", status, code);
    Ok(code)
}

/// Maps a child's exit status to the code this process should exit with.
/// A child killed by a signal yields `128 + signal`, as shells report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
