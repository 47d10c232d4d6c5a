//! Locating the programs the runners spawn.
//!
//! Lookup order for a program:
//! 1. An explicit override environment variable (e.g. `VDESK_SHELL`)
//! 2. `PATH`, via [`which`]
//!
//! An override that points at a missing file is reported, not silently
//! skipped, since the user asked for that exact binary.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{ExecError, Result};

/// Environment variable overriding the shell used by [`ShellRunner`](crate::ShellRunner).
pub const SHELL_ENV: &str = "VDESK_SHELL";

/// Environment variable overriding the docker CLI used by [`DockerRunner`](crate::DockerRunner).
pub const DOCKER_ENV: &str = "VDESK_DOCKER";

/// Resolves `program`, honoring the `override_env` variable first.
pub fn locate_program(program: &str, override_env: &str) -> Result<PathBuf> {
	if let Some(path) = std::env::var_os(override_env).filter(|v| !v.is_empty()) {
		let path = PathBuf::from(path);
		debug!(target = "vdesk", source = override_env, path = %path.display(), "program override");
		if path.is_file() {
			return Ok(path);
		}
		return Err(ExecError::ProgramNotFound(format!(
			"{override_env} points at {}, which does not exist",
			path.display()
		)));
	}

	match which::which(program) {
		Ok(path) => {
			debug!(target = "vdesk", program, path = %path.display(), "program found on PATH");
			Ok(path)
		}
		Err(_) => Err(ExecError::ProgramNotFound(format!("{program} is not installed or not on PATH"))),
	}
}
