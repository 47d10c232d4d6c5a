//! Screen capture for [`Desktop`].

use base64::Engine;
use tracing::{debug, warn};
use uuid::Uuid;
use vdesk_protocol::command;

use super::Desktop;
use crate::error::Result;

/// What [`Desktop::screenshot`] does with the capture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenshotFormat {
	/// Read the PNG back and delete the remote file.
	#[default]
	Bytes,
	/// Leave the PNG at this path on the desktop.
	Remote(String),
}

impl Desktop {
	/// Captures the screen with `scrot`, pointer included.
	///
	/// Returns the PNG bytes for [`ScreenshotFormat::Bytes`], `None` when the
	/// file is kept on the desktop.
	pub async fn screenshot(&self, format: ScreenshotFormat) -> Result<Option<Vec<u8>>> {
		let path = match format {
			ScreenshotFormat::Remote(path) => {
				self.exec(&self.xdo().screenshot(&path)?).await?;
				debug!(target = "vdesk", path = %path, "screenshot kept on desktop");
				return Ok(None);
			}
			ScreenshotFormat::Bytes => format!("/tmp/screenshot-{}.png", Uuid::new_v4()),
		};

		self.exec(&self.xdo().screenshot(&path)?).await?;
		let payload = self.capture(&command::read_base64(&path)?).await;

		if let Err(err) = self.exec(&command::remove_file(&path)?).await {
			warn!(target = "vdesk", path = %path, error = %err, "failed to remove remote screenshot");
		}

		let bytes = base64::prelude::BASE64_STANDARD.decode(payload?.trim())?;
		debug!(target = "vdesk", bytes = bytes.len(), "screenshot");
		Ok(Some(bytes))
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::Error;
	use crate::testing::{ScriptedRunner, exit};

	const PNG_MAGIC_B64: &str = "iVBORw0KGgo=";

	#[tokio::test]
	async fn bytes_reads_back_and_cleans_up() {
		let runner = Arc::new(ScriptedRunner::new(|cmd| {
			if cmd.starts_with("base64 -w 0 ") {
				Ok(format!("{PNG_MAGIC_B64}\n"))
			} else {
				Ok(String::new())
			}
		}));
		let desktop = Desktop::from_shared(runner.clone());

		let bytes = desktop.screenshot(ScreenshotFormat::Bytes).await.unwrap().unwrap();
		assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");

		let sent = runner.commands();
		assert_eq!(sent.len(), 3);
		let path = sent[0].strip_prefix("DISPLAY=:0 scrot --pointer ").unwrap();
		assert!(path.starts_with("/tmp/screenshot-") && path.ends_with(".png"));
		assert_eq!(sent[1], format!("base64 -w 0 {path}"));
		assert_eq!(sent[2], format!("rm -f {path}"));
	}

	#[tokio::test]
	async fn capture_paths_are_unique() {
		let runner = Arc::new(ScriptedRunner::new(|_| Ok(PNG_MAGIC_B64.to_string())));
		let desktop = Desktop::from_shared(runner.clone());
		desktop.screenshot(ScreenshotFormat::Bytes).await.unwrap();
		desktop.screenshot(ScreenshotFormat::Bytes).await.unwrap();

		let sent = runner.commands();
		assert_ne!(sent[0], sent[3]);
	}

	#[tokio::test]
	async fn remote_keeps_file() {
		let runner = Arc::new(ScriptedRunner::ok());
		let desktop = Desktop::from_shared(runner.clone());
		let out = desktop
			.screenshot(ScreenshotFormat::Remote("/tmp/shot.png".into()))
			.await
			.unwrap();
		assert!(out.is_none());
		assert_eq!(runner.commands(), ["DISPLAY=:0 scrot --pointer /tmp/shot.png"]);
	}

	#[tokio::test]
	async fn bad_payload_is_decode_error_and_file_still_removed() {
		let runner = Arc::new(ScriptedRunner::new(|_| Ok("not base64!".into())));
		let desktop = Desktop::from_shared(runner.clone());
		let err = desktop.screenshot(ScreenshotFormat::Bytes).await.unwrap_err();
		assert!(matches!(err, Error::Decode(_)));
		assert_eq!(runner.count("rm -f "), 1);
	}

	#[tokio::test]
	async fn failed_capture_skips_readback() {
		let runner = Arc::new(ScriptedRunner::new(|cmd| Err(exit(cmd, 2))));
		let desktop = Desktop::from_shared(runner.clone());
		let err = desktop.screenshot(ScreenshotFormat::Bytes).await.unwrap_err();
		assert!(matches!(err, Error::Exec(_)));
		assert_eq!(runner.commands().len(), 1);
	}
}
