//! Readiness waiters for [`Desktop`].

use std::future::Future;

use tracing::info;
use vdesk_protocol::command::{self, X_SERVER_PROCESS};

use super::{PollPolicy, Probe, wait_for};
use crate::desktop::Desktop;
use crate::error::Result;

const FIREFOX: &str = "firefox";
const CHROME: &str = "chrome";

impl Desktop {
	/// Polls a caller-supplied condition.
	pub async fn wait_until<F, Fut>(&self, probe: F, policy: PollPolicy, description: &str) -> Result<()>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Probe>,
	{
		wait_for(probe, policy, description).await
	}

	/// Waits until `pgrep -x <name>` finds the process.
	pub async fn wait_for_process(&self, name: &str, policy: PollPolicy) -> Result<()> {
		let check = command::process_running(name)?;
		let check = check.as_str();
		let description = format!("process {name}");
		info!(target = "vdesk", process = name, "waiting for process");
		wait_for(move || self.probe_command(check), policy, &description).await
	}

	/// Waits until the X server runs and answers a screen-size query.
	pub async fn wait_for_display(&self, policy: PollPolicy) -> Result<()> {
		info!(target = "vdesk", display = %self.display(), "waiting for display");
		wait_for(|| async move { Probe::from_result(self.display_ready().await) }, policy, "display").await
	}

	/// Waits until a window titled `name` exists.
	pub async fn wait_for_window(&self, name: &str, policy: PollPolicy) -> Result<()> {
		let description = format!("window {name}");
		info!(target = "vdesk", window = name, "waiting for window");
		wait_for(
			|| async move { Probe::from_result(self.is_window_active(name).await) },
			policy,
			&description,
		)
		.await
	}

	/// Waits until a browser is up: firefox with a window and a focused
	/// window, or any chrome window.
	pub async fn wait_for_browser(&self, policy: PollPolicy) -> Result<()> {
		info!(target = "vdesk", "waiting for browser");
		wait_for(|| self.browser_probe(), policy, "browser").await
	}

	/// Waits until firefox shows a window. The page address itself is not
	/// inspected; `url` only labels the wait.
	pub async fn wait_for_url(&self, url: &str, policy: PollPolicy) -> Result<()> {
		let description = format!("url {url}");
		info!(target = "vdesk", url, "waiting for url");
		wait_for(
			|| async move { Probe::from_result(self.is_window_active(FIREFOX).await) },
			policy,
			&description,
		)
		.await
	}

	/// Waits until something listens on `port` inside the session.
	pub async fn wait_for_port(&self, port: u16, policy: PollPolicy) -> Result<()> {
		let check = command::port_listening(port);
		let check = check.as_str();
		let description = format!("port {port}");
		info!(target = "vdesk", port, "waiting for port");
		wait_for(move || self.probe_command(check), policy, &description).await
	}

	async fn probe_command(&self, command: &str) -> Probe {
		Probe::from_result(self.exec(command).await.map(|()| true))
	}

	async fn display_ready(&self) -> Result<bool> {
		self.exec(&command::process_running(X_SERVER_PROCESS)?).await?;
		self.get_screen_size().await?;
		Ok(true)
	}

	async fn firefox_ready(&self) -> Result<bool> {
		if !self.is_window_active(FIREFOX).await? {
			return Ok(false);
		}
		Ok(!self.get_active_window_id().await?.is_empty())
	}

	async fn browser_probe(&self) -> Probe {
		match Probe::from_result(self.firefox_ready().await) {
			Probe::NotReady => Probe::from_result(self.is_window_active(CHROME).await),
			decided => decided,
		}
	}
}
