//! The command-execution seam.

use async_trait::async_trait;

use crate::error::Result;

/// Executes shell commands inside a remote (or local) desktop session.
///
/// Implementations own the transport. Callers only see "run this command"
/// and the identifiers needed to reach the session's forwarded ports.
#[async_trait]
pub trait CommandRunner: Send + Sync {
	/// Runs `command`, discarding its output. Fails on a non-zero exit.
	async fn run(&self, command: &str) -> Result<()>;

	/// Runs `command` and returns its standard output.
	async fn run_capture(&self, command: &str) -> Result<String>;

	/// Identifier of the sandbox session.
	fn session_id(&self) -> &str;

	/// Identifier of the endpoint (client) the session is reached through.
	fn endpoint_id(&self) -> &str;

	/// Releases the session. Later calls fail with [`ExecError::Closed`](crate::ExecError::Closed).
	async fn close(&self) -> Result<()>;
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
	async fn run(&self, command: &str) -> Result<()> {
		self.as_ref().run(command).await
	}

	async fn run_capture(&self, command: &str) -> Result<String> {
		self.as_ref().run_capture(command).await
	}

	fn session_id(&self) -> &str {
		self.as_ref().session_id()
	}

	fn endpoint_id(&self) -> &str {
		self.as_ref().endpoint_id()
	}

	async fn close(&self) -> Result<()> {
		self.as_ref().close().await
	}
}
