//! JSON config file.
//!
//! Looked up at `$XDG_CONFIG_HOME/vdesk/config.json` unless `--config`
//! names another file. Flags override file values.
//!
//! ```json
//! {
//!   "display": ":1",
//!   "container": "desk-1",
//!   "endpointId": "a1b2c3",
//!   "stream": { "domain": "e2b.app", "resize": "remote" },
//!   "poll": { "intervalMs": 500, "attempts": 60 }
//! }
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vdesk::{PollPolicy, StreamConfig};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
	/// X display, e.g. `:0`.
	pub display: Option<String>,
	/// Docker container to run commands in. Local shell when unset.
	pub container: Option<String>,
	/// Endpoint id used in the stream URL.
	pub endpoint_id: Option<String>,
	pub stream: StreamConfig,
	pub poll: PollConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollConfig {
	pub interval_ms: Option<u64>,
	pub attempts: Option<u32>,
}

impl PollConfig {
	/// Fills unset fields from [`PollPolicy::default`].
	pub fn policy(&self) -> PollPolicy {
		let mut policy = PollPolicy::default();
		if let Some(attempts) = self.attempts {
			policy.max_attempts = attempts;
		}
		if let Some(ms) = self.interval_ms {
			policy.interval = Duration::from_millis(ms);
		}
		policy
	}
}

/// Default config location, if a config directory can be determined.
///
/// `XDG_CONFIG_HOME` is checked first on every platform; `dirs` only
/// honours it on Linux, and the config path is documented in XDG terms.
pub fn default_path() -> Option<PathBuf> {
	config_home(std::env::var_os("XDG_CONFIG_HOME")).map(|dir| dir.join("vdesk").join("config.json"))
}

fn config_home(xdg: Option<OsString>) -> Option<PathBuf> {
	xdg.filter(|v| !v.is_empty()).map(PathBuf::from).or_else(dirs::config_dir)
}

/// Loads `explicit`, or the default file when it exists.
///
/// A missing default file yields defaults; a missing explicit file is an
/// error. Malformed JSON is always an error.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
	match explicit {
		Some(path) => read(path),
		None => match default_path() {
			Some(path) if path.is_file() => read(&path),
			_ => Ok(Config::default()),
		},
	}
}

fn read(path: &Path) -> Result<Config> {
	let parsed = fs::read_to_string(path)
		.context("failed to read file")
		.and_then(|content| serde_json::from_str::<Config>(&content).context("invalid JSON"));

	match parsed {
		Ok(config) => {
			debug!(target = "vdesk", path = %path.display(), "loaded config");
			Ok(config)
		}
		Err(source) => Err(CliError::Config {
			path: path.to_path_buf(),
			source,
		}),
	}
}
