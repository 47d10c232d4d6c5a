//! Runner for a desktop living in a docker container.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{ExecError, Result};
use crate::locate::{DOCKER_ENV, locate_program};
use crate::process::{SessionState, execute};
use crate::runner::CommandRunner;
use crate::shell::DEFAULT_COMMAND_TIMEOUT;

/// Runs commands with `docker exec <container> sh -c <command>`.
///
/// The container name doubles as the session id.
#[derive(Debug)]
pub struct DockerRunner {
	docker: PathBuf,
	container: String,
	user: Option<String>,
	endpoint_id: String,
	command_timeout: Option<Duration>,
	stop_on_close: bool,
	state: SessionState,
}

impl DockerRunner {
	/// Locates the docker CLI (or `$VDESK_DOCKER`) and targets `container`.
	pub fn new(container: impl Into<String>) -> Result<Self> {
		let docker = locate_program("docker", DOCKER_ENV)?;
		Self::with_docker(docker, container)
	}

	pub fn with_docker(docker: impl Into<PathBuf>, container: impl Into<String>) -> Result<Self> {
		let container = container.into();
		if container.is_empty() || container.starts_with('-') {
			return Err(ExecError::InvalidTarget(format!("container name {container:?}")));
		}
		Ok(Self {
			docker: docker.into(),
			container,
			user: None,
			endpoint_id: "docker".to_string(),
			command_timeout: Some(DEFAULT_COMMAND_TIMEOUT),
			stop_on_close: false,
			state: SessionState::default(),
		})
	}

	/// Runs commands as `user` inside the container.
	pub fn with_user(mut self, user: impl Into<String>) -> Self {
		self.user = Some(user.into());
		self
	}

	pub fn with_endpoint_id(mut self, endpoint_id: impl Into<String>) -> Self {
		self.endpoint_id = endpoint_id.into();
		self
	}

	pub fn with_command_timeout(mut self, limit: Option<Duration>) -> Self {
		self.command_timeout = limit;
		self
	}

	/// Stops the container when the session is closed.
	pub fn stop_on_close(mut self, stop: bool) -> Self {
		self.stop_on_close = stop;
		self
	}

	pub fn container(&self) -> &str {
		&self.container
	}

	/// Arguments after the docker binary for one command.
	pub(crate) fn exec_args<'a>(&'a self, command: &'a str) -> Vec<&'a str> {
		let mut args = vec!["exec"];
		if let Some(user) = &self.user {
			args.extend(["--user", user.as_str()]);
		}
		args.extend([self.container.as_str(), "sh", "-c", command]);
		args
	}

	async fn exec(&self, command: &str) -> Result<String> {
		self.state.ensure_open(&self.container)?;
		let mut child = Command::new(&self.docker);
		child.args(self.exec_args(command));
		execute(child, "docker exec", command, self.command_timeout).await
	}
}

#[async_trait]
impl CommandRunner for DockerRunner {
	async fn run(&self, command: &str) -> Result<()> {
		self.exec(command).await.map(|_| ())
	}

	async fn run_capture(&self, command: &str) -> Result<String> {
		self.exec(command).await
	}

	fn session_id(&self) -> &str {
		&self.container
	}

	fn endpoint_id(&self) -> &str {
		&self.endpoint_id
	}

	async fn close(&self) -> Result<()> {
		if !self.state.close() {
			return Ok(());
		}
		info!(target = "vdesk", container = %self.container, "session closed");

		if self.stop_on_close {
			let mut child = Command::new(&self.docker);
			child.args(["stop", self.container.as_str()]);
			if let Err(err) = execute(child, "docker stop", &self.container, self.command_timeout).await {
				warn!(target = "vdesk", container = %self.container, error = %err, "failed to stop container");
				return Err(err);
			}
		}
		Ok(())
	}
}
