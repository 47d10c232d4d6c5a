//! Result envelope printed by every command.
//!
//! ## Output Contract
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "screen-size",
//!   "data": { "width": 1024, "height": 768 },
//!   "timings": { "durationMs": 41 }
//! }
//! ```
//!
//! On failure `data` is absent and `error` carries a stable code:
//!
//! ```json
//! {
//!   "ok": false,
//!   "command": "wait",
//!   "error": {
//!     "code": "TIMEOUT",
//!     "message": "display not ready after 30 attempts",
//!     "details": { "condition": "display", "attempts": 30 }
//!   }
//! }
//! ```


use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Bumped on breaking changes to the envelope.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// TOON (default, compact for LLM agents)
	#[default]
	Toon,
	/// Pretty JSON
	Json,
	/// One JSON object per line
	Ndjson,
	/// Human-readable text
	Text,
}

impl std::str::FromStr for OutputFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"toon" => Ok(Self::Toon),
			"json" => Ok(Self::Json),
			"ndjson" => Ok(Self::Ndjson),
			"text" => Ok(Self::Text),
			_ => Err(format!("unknown format: {s}")),
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,

	pub ok: bool,

	/// Subcommand name, e.g. `click` or `wait`.
	pub command: String,

	/// Arguments as the command understood them.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inputs: Option<serde_json::Value>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,

	/// Files written on this machine.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub artifacts: Vec<Artifact>,

	/// Session the command ran against.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub session: Option<SessionInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Stable error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// A desktop command failed or could not be started
	ExecFailed,
	/// A readiness wait ran out of attempts
	Timeout,
	/// Rejected before anything was sent
	InvalidInput,
	/// A query printed something unexpected
	ParseFailed,
	/// Local file I/O failed
	IoError,
	/// The config file is missing or malformed
	ConfigError,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let code = match self {
			ErrorCode::ExecFailed => "EXEC_FAILED",
			ErrorCode::Timeout => "TIMEOUT",
			ErrorCode::InvalidInput => "INVALID_INPUT",
			ErrorCode::ParseFailed => "PARSE_FAILED",
			ErrorCode::IoError => "IO_ERROR",
			ErrorCode::ConfigError => "CONFIG_ERROR",
			ErrorCode::InternalError => "INTERNAL_ERROR",
		};
		f.write_str(code)
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Timings {
			duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
	#[serde(rename = "type")]
	pub artifact_type: ArtifactType,
	pub path: PathBuf,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size_bytes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
	Screenshot,
}

/// Which runner and display a command used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
	/// `shell` or `docker`.
	pub runner: String,
	pub session_id: String,
	pub display: String,
}

pub struct ResultBuilder<T: Serialize> {
	command: String,
	inputs: Option<serde_json::Value>,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
	artifacts: Vec<Artifact>,
	session: Option<SessionInfo>,
}

impl<T: Serialize> ResultBuilder<T> {
	/// Starts the clock for `command`.
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			inputs: None,
			data: None,
			error: None,
			start_time: Instant::now(),
			artifacts: Vec::new(),
			session: None,
		}
	}

	/// Like [`new`](Self::new) but timed from `start`.
	pub fn started_at(command: impl Into<String>, start: Instant) -> Self {
		Self {
			start_time: start,
			..Self::new(command)
		}
	}

	pub fn inputs(mut self, inputs: serde_json::Value) -> Self {
		if !inputs.is_null() {
			self.inputs = Some(inputs);
		}
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	pub fn artifact(mut self, artifact: Artifact) -> Self {
		self.artifacts.push(artifact);
		self
	}

	pub fn session(mut self, session: SessionInfo) -> Self {
		self.session = Some(session);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();

		CommandResult {
			schema_version: Some(SCHEMA_VERSION),
			ok,
			command: self.command,
			inputs: self.inputs,
			data: self.data,
			error: self.error,
			timings: Some(Timings::from(self.start_time.elapsed())),
			artifacts: self.artifacts,
			session: self.session,
		}
	}
}

/// Prints `result` to stdout in `format`.
pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	let mut stdout = io::stdout().lock();
	let _ = write_result(&mut stdout, result, format);
}

pub(crate) fn write_result<W: Write, T: Serialize>(out: &mut W, result: &CommandResult<T>, format: OutputFormat) -> io::Result<()> {
	match format {
		OutputFormat::Toon => {
			if let Ok(json_value) = serde_json::to_value(result) {
				writeln!(out, "{}", toon::encode(&json_value, None))?;
			}
		}
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				writeln!(out, "{json}")?;
			}
		}
		OutputFormat::Ndjson => {
			if let Ok(json) = serde_json::to_string(result) {
				writeln!(out, "{json}")?;
			}
		}
		OutputFormat::Text => write_text(out, result)?,
	}
	Ok(())
}

fn write_text<W: Write, T: Serialize>(out: &mut W, result: &CommandResult<T>) -> io::Result<()> {
	if result.ok {
		if let Some(value) = result.data.as_ref().and_then(|d| serde_json::to_value(d).ok()) {
			match value {
				serde_json::Value::String(s) => writeln!(out, "{s}")?,
				serde_json::Value::Null => {}
				other => {
					if let Ok(json) = serde_json::to_string_pretty(&other) {
						writeln!(out, "{json}")?;
					}
				}
			}
		}
	} else if let Some(ref error) = result.error {
		writeln!(out, "Error [{}]: {}", error.code, error.message)?;
	}

	for artifact in &result.artifacts {
		writeln!(out, "Saved {:?}: {}", artifact.artifact_type, artifact.path.display())?;
	}
	Ok(())
}

pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
