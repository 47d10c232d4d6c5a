//! [`Desktop`] handle over one remote session.

mod input;
mod query;
mod screenshot;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use vdesk_protocol::{StreamConfig, Url, Xdo};
use vdesk_runtime::CommandRunner;

pub use input::{DEFAULT_CHUNK_SIZE, DEFAULT_TYPE_DELAY};
pub use screenshot::ScreenshotFormat;

use crate::error::Result;

/// A virtual X11 desktop reached through a [`CommandRunner`].
///
/// Each action renders a single shell command and sends it through the
/// runner. The handle is meant for one owner; concurrent actions on the same
/// desktop are not coordinated.
#[derive(Clone)]
pub struct Desktop {
	runner: Arc<dyn CommandRunner>,
	xdo: Xdo,
}

impl fmt::Debug for Desktop {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Desktop")
			.field("session", &self.runner.session_id())
			.field("display", &self.xdo.display())
			.finish()
	}
}

impl Desktop {
	/// Wraps `runner`, targeting display `:0`.
	pub fn new(runner: impl CommandRunner + 'static) -> Self {
		Self::from_shared(Arc::new(runner))
	}

	pub fn from_shared(runner: Arc<dyn CommandRunner>) -> Self {
		Self {
			runner,
			xdo: Xdo::default(),
		}
	}

	/// Targets another X display, e.g. `:1`.
	pub fn with_display(mut self, display: impl Into<String>) -> Result<Self> {
		self.xdo = Xdo::new(display)?;
		Ok(self)
	}

	pub fn display(&self) -> &str {
		self.xdo.display()
	}

	pub fn runner(&self) -> &dyn CommandRunner {
		self.runner.as_ref()
	}

	pub fn session_id(&self) -> &str {
		self.runner.session_id()
	}

	/// Sleeps locally; nothing is sent to the session.
	pub async fn wait(&self, duration: Duration) {
		tokio::time::sleep(duration).await;
	}

	/// URL of the noVNC viewer for this session.
	pub fn stream_url(&self, config: &StreamConfig) -> Result<Url> {
		Ok(config.url(self.runner.session_id(), self.runner.endpoint_id())?)
	}

	/// Releases the underlying session.
	pub async fn close(&self) -> Result<()> {
		info!(target = "vdesk", session = %self.runner.session_id(), "closing desktop");
		Ok(self.runner.close().await?)
	}

	pub(crate) fn xdo(&self) -> &Xdo {
		&self.xdo
	}

	pub(crate) async fn exec(&self, command: &str) -> Result<()> {
		debug!(target = "vdesk", command, "run");
		Ok(self.runner.run(command).await?)
	}

	pub(crate) async fn capture(&self, command: &str) -> Result<String> {
		debug!(target = "vdesk", command, "capture");
		Ok(self.runner.run_capture(command).await?)
	}
}
