// Error types for vdesk-runtime

use std::time::Duration;

use thiserror::Error;

/// Result type alias for command execution
pub type Result<T> = std::result::Result<T, ExecError>;

/// Errors reported by a [`CommandRunner`](crate::CommandRunner).
#[derive(Debug, Error)]
pub enum ExecError {
	/// The command ran and exited unsuccessfully.
	///
	/// `code` is `None` when the process was killed by a signal.
	#[error("command exited with {}: {command}{}", exit_label(.code), stderr_suffix(.stderr))]
	NonZeroExit {
		command: String,
		code: Option<i32>,
		stdout: String,
		stderr: String,
	},

	/// The program that runs commands (shell, docker CLI) could not be found.
	#[error("program not found: {0}")]
	ProgramNotFound(String),

	/// Spawning or talking to the child process failed.
	#[error("failed to run {program}: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	/// The command did not finish within the runner's per-command limit.
	#[error("command timed out after {}ms: {command}", .after.as_millis())]
	TimedOut { command: String, after: Duration },

	/// The session target (container name, ...) is unusable.
	#[error("invalid session target: {0}")]
	InvalidTarget(String),

	/// The session was closed; no further commands are accepted.
	#[error("session {0} is closed")]
	Closed(String),
}

fn exit_label(code: &Option<i32>) -> String {
	match code {
		Some(code) => format!("status {code}"),
		None => "a signal".to_string(),
	}
}

fn stderr_suffix(stderr: &str) -> String {
	let stderr = stderr.trim();
	if stderr.is_empty() {
		String::new()
	} else {
		format!(" ({stderr})")
	}
}

impl ExecError {
	/// Returns the exit status if the command ran to completion.
	pub fn exit_code(&self) -> Option<i32> {
		match self {
			ExecError::NonZeroExit { code, .. } => *code,
			_ => None,
		}
	}

	/// Returns true when retrying cannot succeed: the session is gone or the
	/// runner's program is missing.
	pub fn is_fatal(&self) -> bool {
		matches!(self, ExecError::Closed(_) | ExecError::ProgramNotFound(_))
	}
}
