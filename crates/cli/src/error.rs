use std::path::PathBuf;

use serde_json::json;
use thiserror::Error;
use vdesk::ExecError;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Desktop(#[from] vdesk::Error),

	#[error("config {}: {source:#}", .path.display())]
	Config {
		path: PathBuf,
		#[source]
		source: anyhow::Error,
	},

	#[error("{0}")]
	InvalidInput(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl From<ExecError> for CliError {
	fn from(err: ExecError) -> Self {
		Self::Desktop(err.into())
	}
}

impl CliError {
	/// Structured form for the result envelope.
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Desktop(err) => classify(err),
			CliError::Config { path, .. } => (ErrorCode::ConfigError, Some(json!({ "path": path }))),
			CliError::InvalidInput(_) => (ErrorCode::InvalidInput, None),
			CliError::Io(_) => (ErrorCode::IoError, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}
}

fn classify(err: &vdesk::Error) -> (ErrorCode, Option<serde_json::Value>) {
	match err {
		vdesk::Error::Exec(ExecError::NonZeroExit {
			command, code, stderr, ..
		}) => (
			ErrorCode::ExecFailed,
			Some(json!({ "command": command, "exitCode": code, "stderr": stderr.trim() })),
		),
		vdesk::Error::Exec(ExecError::TimedOut { command, after }) => (
			ErrorCode::ExecFailed,
			Some(json!({ "command": command, "timeoutMs": u64::try_from(after.as_millis()).unwrap_or(u64::MAX) })),
		),
		vdesk::Error::Exec(_) => (ErrorCode::ExecFailed, None),
		vdesk::Error::Timeout { description, attempts } => (
			ErrorCode::Timeout,
			Some(json!({ "condition": description, "attempts": attempts })),
		),
		vdesk::Error::InvalidArgument(_) => (ErrorCode::InvalidInput, None),
		vdesk::Error::Parse { what, output } => (ErrorCode::ParseFailed, Some(json!({ "what": what, "output": output }))),
		vdesk::Error::Decode(_) => (ErrorCode::ParseFailed, None),
	}
}
