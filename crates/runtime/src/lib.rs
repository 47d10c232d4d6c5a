//! Command execution backends for vdesk.
//!
//! Everything vdesk does to a desktop is a shell command. This crate defines
//! the [`CommandRunner`] seam and two implementations:
//!
//! - [`ShellRunner`] - `sh -c` on the local host
//! - [`DockerRunner`] - `docker exec` into a container

pub mod docker;
pub mod error;
pub mod locate;
mod process;
pub mod runner;
pub mod shell;

pub use docker::DockerRunner;
pub use error::{ExecError, Result};
pub use runner::CommandRunner;
pub use shell::ShellRunner;
