//! Read-only queries for [`Desktop`].

use vdesk_protocol::{Point, ScreenSize, parse};
use vdesk_runtime::ExecError;

use super::Desktop;
use crate::error::Result;

impl Desktop {
	pub async fn get_cursor_position(&self) -> Result<Point> {
		let output = self.capture(&self.xdo().cursor_location()).await?;
		Ok(parse::mouse_location(&output)?)
	}

	pub async fn get_screen_size(&self) -> Result<ScreenSize> {
		let output = self.capture(&self.xdo().screen_dimensions()).await?;
		Ok(parse::screen_dimensions(&output)?)
	}

	/// Id of the focused window, trimmed. Empty when nothing has focus.
	pub async fn get_active_window_id(&self) -> Result<String> {
		let output = self.capture(&self.xdo().active_window()).await?;
		Ok(output.trim().to_string())
	}

	/// Ids of windows whose title matches `name`.
	///
	/// `xdotool search` exits 1 when nothing matches; that is an empty list,
	/// not an error.
	pub async fn find_windows(&self, name: &str) -> Result<Vec<String>> {
		let command = self.xdo().search_windows(name)?;
		match self.capture(&command).await {
			Ok(output) => Ok(parse::window_ids(&output)),
			Err(crate::Error::Exec(ExecError::NonZeroExit {
				code: Some(1), stdout, ..
			})) if stdout.trim().is_empty() => Ok(Vec::new()),
			Err(err) => Err(err),
		}
	}

	/// Whether at least one window matches `name`.
	pub async fn is_window_active(&self, name: &str) -> Result<bool> {
		Ok(!self.find_windows(name).await?.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::Error;
	use crate::testing::{ScriptedRunner, exit};

	fn desktop(respond: impl Fn(&str) -> std::result::Result<String, ExecError> + Send + Sync + 'static) -> Desktop {
		Desktop::from_shared(Arc::new(ScriptedRunner::new(respond)))
	}

	#[tokio::test]
	async fn cursor_position_parses_shell_output() {
		let desktop = desktop(|_| Ok("X=512\nY=384\nSCREEN=0\nWINDOW=4194305\n".into()));
		assert_eq!(desktop.get_cursor_position().await.unwrap(), Point::new(512, 384));
	}

	#[tokio::test]
	async fn cursor_position_without_y_is_parse_error() {
		let desktop = desktop(|_| Ok("X=512\n".into()));
		let err = desktop.get_cursor_position().await.unwrap_err();
		assert!(matches!(err, Error::Parse { what: "cursor position", .. }));
	}

	#[tokio::test]
	async fn screen_size_parses_xdpyinfo() {
		let desktop = desktop(|cmd| {
			assert_eq!(cmd, "DISPLAY=:0 xdpyinfo | grep dimensions");
			Ok("  dimensions:    1024x768 pixels (270x203 millimeters)\n".into())
		});
		let size = desktop.get_screen_size().await.unwrap();
		assert_eq!((size.width, size.height), (1024, 768));
	}

	#[tokio::test]
	async fn active_window_is_trimmed() {
		let desktop = desktop(|_| Ok("4194305\n".into()));
		assert_eq!(desktop.get_active_window_id().await.unwrap(), "4194305");
	}

	#[tokio::test]
	async fn find_windows_lists_ids() {
		let desktop = desktop(|_| Ok("123\n456\n".into()));
		assert_eq!(desktop.find_windows("firefox").await.unwrap(), ["123", "456"]);
		assert!(desktop.is_window_active("firefox").await.unwrap());
	}

	#[tokio::test]
	async fn find_windows_without_match_is_empty() {
		let no_match = desktop(|cmd| Err(exit(cmd, 1)));
		assert!(no_match.find_windows("firefox").await.unwrap().is_empty());
		assert!(!no_match.is_window_active("firefox").await.unwrap());

		let silent = desktop(|_| Ok(String::new()));
		assert!(silent.find_windows("firefox").await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn find_windows_propagates_other_failures() {
		let desktop = desktop(|cmd| Err(exit(cmd, 127)));
		let err = desktop.find_windows("firefox").await.unwrap_err();
		assert!(matches!(err, Error::Exec(ExecError::NonZeroExit { code: Some(127), .. })));
	}
}
