//! Runner for a desktop on the local host.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::error::Result;
use crate::locate::{SHELL_ENV, locate_program};
use crate::process::{SessionState, execute};
use crate::runner::CommandRunner;

/// Default limit for a single command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs every command as `sh -c <command>` on this machine.
///
/// Useful when the X server and VNC bridge run locally, or inside the sandbox
/// itself. The session id is always `local`.
#[derive(Debug)]
pub struct ShellRunner {
	shell: PathBuf,
	endpoint_id: String,
	command_timeout: Option<Duration>,
	state: SessionState,
}

impl ShellRunner {
	pub const SESSION_ID: &'static str = "local";

	/// Locates `sh` (or `$VDESK_SHELL`) and builds a runner.
	pub fn new() -> Result<Self> {
		let shell = locate_program("sh", SHELL_ENV)?;
		Ok(Self::with_shell(shell))
	}

	pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
		Self {
			shell: shell.into(),
			endpoint_id: "localhost".to_string(),
			command_timeout: Some(DEFAULT_COMMAND_TIMEOUT),
			state: SessionState::default(),
		}
	}

	pub fn with_endpoint_id(mut self, endpoint_id: impl Into<String>) -> Self {
		self.endpoint_id = endpoint_id.into();
		self
	}

	/// `None` lets commands run unbounded.
	pub fn with_command_timeout(mut self, limit: Option<Duration>) -> Self {
		self.command_timeout = limit;
		self
	}

	fn command(&self, command: &str) -> Command {
		let mut child = Command::new(&self.shell);
		child.arg("-c").arg(command);
		child
	}

	async fn exec(&self, command: &str) -> Result<String> {
		self.state.ensure_open(Self::SESSION_ID)?;
		let program = self.shell.display().to_string();
		execute(self.command(command), &program, command, self.command_timeout).await
	}
}

#[async_trait]
impl CommandRunner for ShellRunner {
	async fn run(&self, command: &str) -> Result<()> {
		self.exec(command).await.map(|_| ())
	}

	async fn run_capture(&self, command: &str) -> Result<String> {
		self.exec(command).await
	}

	fn session_id(&self) -> &str {
		Self::SESSION_ID
	}

	fn endpoint_id(&self) -> &str {
		&self.endpoint_id
	}

	async fn close(&self) -> Result<()> {
		if self.state.close() {
			info!(target = "vdesk", session = Self::SESSION_ID, "session closed");
		}
		Ok(())
	}
}
