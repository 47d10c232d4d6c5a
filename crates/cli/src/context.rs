//! Shared context handed to every desktop command.

use std::sync::Arc;

use tracing::debug;
use vdesk::{CommandRunner, Desktop, DockerRunner, PollPolicy, ShellRunner, StreamConfig};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::output::SessionInfo;

/// Flags and config file merged, plus the desktop they select.
#[derive(Debug)]
pub struct CommandContext {
	pub desktop: Desktop,
	pub poll: PollPolicy,
	pub stream: StreamConfig,
	pub session: SessionInfo,
}

/// Runner and display after flags override the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
	pub container: Option<String>,
	pub display: Option<String>,
	pub endpoint_id: Option<String>,
}

impl Target {
	pub(crate) fn resolve(cli: &Cli, config: &Config) -> Self {
		Self {
			container: cli.container.clone().or_else(|| config.container.clone()),
			display: cli.display.clone().or_else(|| config.display.clone()),
			endpoint_id: config.endpoint_id.clone(),
		}
	}
}

impl CommandContext {
	pub fn build(cli: &Cli, config: Config) -> Result<Self> {
		let target = Target::resolve(cli, &config);

		let (runner, kind): (Arc<dyn CommandRunner>, &str) = match &target.container {
			Some(container) => {
				let mut runner = DockerRunner::new(container.as_str())?;
				if let Some(endpoint) = &target.endpoint_id {
					runner = runner.with_endpoint_id(endpoint.as_str());
				}
				(Arc::new(runner), "docker")
			}
			None => {
				let mut runner = ShellRunner::new()?;
				if let Some(endpoint) = &target.endpoint_id {
					runner = runner.with_endpoint_id(endpoint.as_str());
				}
				(Arc::new(runner), "shell")
			}
		};

		let mut desktop = Desktop::from_shared(runner);
		if let Some(display) = &target.display {
			desktop = desktop.with_display(display.as_str())?;
		}

		let session = SessionInfo {
			runner: kind.to_string(),
			session_id: desktop.session_id().to_string(),
			display: desktop.display().to_string(),
		};
		debug!(target = "vdesk", runner = kind, session = %session.session_id, display = %session.display, "desktop ready");

		Ok(Self {
			desktop,
			poll: config.poll.policy(),
			stream: config.stream,
			session,
		})
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	fn cli(args: &[&str]) -> Cli {
		let mut argv = vec!["vdesk"];
		argv.extend_from_slice(args);
		Cli::try_parse_from(argv).unwrap()
	}

	#[test]
	fn flags_override_config() {
		let config = Config {
			display: Some(":5".into()),
			container: Some("from-config".into()),
			endpoint_id: Some("edge".into()),
			..Config::default()
		};
		let target = Target::resolve(&cli(&["cursor", "--display", ":1"]), &config);
		assert_eq!(target.display.as_deref(), Some(":1"));
		assert_eq!(target.container.as_deref(), Some("from-config"));
		assert_eq!(target.endpoint_id.as_deref(), Some("edge"));
	}

	#[test]
	fn config_fills_missing_flags() {
		let target = Target::resolve(&cli(&["cursor"]), &Config::default());
		assert_eq!(target.display, None);
		assert_eq!(target.container, None);
	}

	#[test]
	fn local_shell_context() {
		let ctx = CommandContext::build(&cli(&["cursor", "--display", ":3"]), Config::default()).unwrap();
		assert_eq!(ctx.session.runner, "shell");
		assert_eq!(ctx.session.session_id, "local");
		assert_eq!(ctx.session.display, ":3");
		assert_eq!(ctx.poll, PollPolicy::default());
	}

	#[test]
	fn bad_display_is_rejected() {
		let err = CommandContext::build(&cli(&["cursor", "--display", "nope"]), Config::default()).unwrap_err();
		assert_eq!(err.to_command_error().code, crate::output::ErrorCode::InvalidInput);
	}
}
