//! Subprocess execution
//!
//! One command in, captured output out. Exit codes are interpreted only as
//! zero/non-zero; classifying outcomes is the caller's job. No retries.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{ClientError, Result};

/// Run `program` with `args`, feeding `input` to stdin when given
///
/// Standard error is captured for diagnostics. On non-zero exit the error
/// carries the full command line and whatever stderr produced; on success
/// the captured stdout is returned for further parsing.
pub fn run(program: &Path, args: &[String], input: Option<&str>) -> Result<String> {
    let command_line = display_command(program, args);

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| ClientError::Spawn {
        command: command_line.clone(),
        source,
    })?;

    if let Some(payload) = input {
        if let Some(mut stdin) = child.stdin.take() {
            // A child that exits without draining stdin breaks the pipe;
            // its exit status below is the meaningful signal, not EPIPE.
            let _ = stdin.write_all(payload.as_bytes());
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|source| ClientError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(ClientError::CommandFailed {
            command: command_line,
            status: output.status,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The command line as shown in errors and logs
fn display_command(program: &Path, args: &[String]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
