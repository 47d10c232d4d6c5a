//! Child-process plumbing shared by the runners.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::{ExecError, Result};

/// Open/closed flag for a session.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
	closed: AtomicBool,
}

impl SessionState {
	pub(crate) fn ensure_open(&self, session_id: &str) -> Result<()> {
		if self.closed.load(Ordering::Acquire) {
			return Err(ExecError::Closed(session_id.to_string()));
		}
		Ok(())
	}

	/// Marks the session closed. Returns false if it already was.
	pub(crate) fn close(&self) -> bool {
		!self.closed.swap(true, Ordering::AcqRel)
	}
}

/// Runs a prepared child to completion and returns its stdout.
///
/// `command` is the shell text being executed, used for errors and logs.
pub(crate) async fn execute(mut child: Command, program: &str, command: &str, limit: Option<Duration>) -> Result<String> {
	child
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.kill_on_drop(true);

	debug!(target = "vdesk", program, command, "exec");

	let pending = child.output();
	let output = match limit {
		Some(after) => tokio::time::timeout(after, pending)
			.await
			.map_err(|_| ExecError::TimedOut {
				command: command.to_string(),
				after,
			})?,
		None => pending.await,
	}
	.map_err(|source| ExecError::Spawn {
		program: program.to_string(),
		source,
	})?;

	let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
	let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
	trace!(target = "vdesk", status = ?output.status.code(), stdout_len = stdout.len(), "exec finished");

	if output.status.success() {
		return Ok(stdout);
	}

	Err(ExecError::NonZeroExit {
		command: command.to_string(),
		code: output.status.code(),
		stdout,
		stderr,
	})
}
