//! Pointer and keyboard actions for [`Desktop`].

use std::time::Duration;

use tracing::debug;
use vdesk_protocol::{KeyPress, MouseButton, Point, ScrollDirection};

use super::Desktop;
use crate::error::{Error, Result};

/// Characters per `xdotool type` call in [`Desktop::write`].
pub const DEFAULT_CHUNK_SIZE: usize = 25;

/// Per-keystroke delay in [`Desktop::write`].
pub const DEFAULT_TYPE_DELAY: Duration = Duration::from_millis(75);

impl Desktop {
	/// Left click at `at`, or at the current pointer position when `None`.
	pub async fn left_click(&self, at: Option<Point>) -> Result<()> {
		self.click(MouseButton::Left, at).await
	}

	pub async fn right_click(&self, at: Option<Point>) -> Result<()> {
		self.click(MouseButton::Right, at).await
	}

	pub async fn middle_click(&self, at: Option<Point>) -> Result<()> {
		self.click(MouseButton::Middle, at).await
	}

	pub async fn click(&self, button: MouseButton, at: Option<Point>) -> Result<()> {
		self.exec(&self.xdo().click(button, at)).await
	}

	pub async fn double_click(&self, at: Option<Point>) -> Result<()> {
		self.exec(&self.xdo().double_click(at)).await
	}

	pub async fn move_mouse(&self, x: i32, y: i32) -> Result<()> {
		self.exec(&self.xdo().move_mouse(Point::new(x, y))).await
	}

	/// Presses `button` without releasing it.
	pub async fn mouse_press(&self, button: MouseButton) -> Result<()> {
		self.exec(&self.xdo().mouse_down(button)).await
	}

	pub async fn mouse_release(&self, button: MouseButton) -> Result<()> {
		self.exec(&self.xdo().mouse_up(button)).await
	}

	/// Left-button drag from `from` to `to`.
	pub async fn drag(&self, from: Point, to: Point) -> Result<()> {
		self.exec(&self.xdo().drag(from, to)).await
	}

	/// Scrolls `amount` wheel notches.
	pub async fn scroll(&self, direction: ScrollDirection, amount: u32) -> Result<()> {
		let command = self.xdo().scroll(direction, amount)?;
		self.exec(&command).await
	}

	/// Types `text` at the focused window in one command.
	pub async fn type_text(&self, text: &str) -> Result<()> {
		let command = self.xdo().type_text(text)?;
		self.exec(&command).await
	}

	/// Types `text` in chunks of `chunk_size` characters, pausing `delay`
	/// between keystrokes. Long inputs stay under the remote command length
	/// limit and slow applications keep up.
	pub async fn write(&self, text: &str, chunk_size: usize, delay: Duration) -> Result<()> {
		if chunk_size == 0 {
			return Err(Error::InvalidArgument("chunk size must be at least 1".into()));
		}

		let chars: Vec<char> = text.chars().collect();
		let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
		let total = chars.len().div_ceil(chunk_size);

		for (index, chunk) in chars.chunks(chunk_size).enumerate() {
			let chunk: String = chunk.iter().collect();
			debug!(target = "vdesk", chunk = index + 1, total, "write");
			let command = self.xdo().type_delayed(&chunk, delay_ms)?;
			self.exec(&command).await?;
		}
		Ok(())
	}

	/// Presses a key or chord. Names go through the key alias table.
	pub async fn press_key(&self, key: impl Into<KeyPress>) -> Result<()> {
		let command = self.xdo().key(&key.into())?;
		self.exec(&command).await
	}

	/// Opens a file or URL with the desktop's default handler.
	pub async fn open(&self, path_or_url: &str) -> Result<()> {
		let command = self.xdo().open(path_or_url)?;
		self.exec(&command).await
	}

	/// Starts firefox in the background.
	pub async fn launch_browser(&self) -> Result<()> {
		self.exec(&self.xdo().launch_browser()).await
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::testing::{ScriptedRunner, exit};

	fn desktop() -> (Desktop, Arc<ScriptedRunner>) {
		let runner = Arc::new(ScriptedRunner::ok());
		(Desktop::from_shared(runner.clone()), runner)
	}

	#[tokio::test]
	async fn click_without_point_never_moves() {
		let (desktop, runner) = desktop();
		desktop.left_click(None).await.unwrap();
		desktop.right_click(None).await.unwrap();
		desktop.middle_click(None).await.unwrap();
		desktop.double_click(None).await.unwrap();

		assert_eq!(
			runner.commands(),
			[
				"DISPLAY=:0 xdotool click 1",
				"DISPLAY=:0 xdotool click 3",
				"DISPLAY=:0 xdotool click 2",
				"DISPLAY=:0 xdotool click --repeat 2 1",
			]
		);
		assert_eq!(runner.count("mousemove"), 0);
	}

	#[tokio::test]
	async fn click_with_point_is_one_combined_command() {
		let (desktop, runner) = desktop();
		desktop.right_click(Some(Point::new(0, 0))).await.unwrap();
		desktop.double_click(Some(Point::new(640, 12))).await.unwrap();

		assert_eq!(
			runner.commands(),
			[
				"DISPLAY=:0 xdotool mousemove 0 0 click 3",
				"DISPLAY=:0 xdotool mousemove 640 12 click --repeat 2 1",
			]
		);
	}

	#[tokio::test]
	async fn pointer_actions() {
		let (desktop, runner) = desktop();
		desktop.move_mouse(10, 20).await.unwrap();
		desktop.mouse_press(MouseButton::Left).await.unwrap();
		desktop.mouse_release(MouseButton::Right).await.unwrap();
		desktop.drag(Point::new(1, 2), Point::new(3, 4)).await.unwrap();
		desktop.scroll(ScrollDirection::Up, 3).await.unwrap();

		assert_eq!(
			runner.commands(),
			[
				"DISPLAY=:0 xdotool mousemove 10 20",
				"DISPLAY=:0 xdotool mousedown 1",
				"DISPLAY=:0 xdotool mouseup 3",
				"DISPLAY=:0 xdotool mousemove 1 2 mousedown 1 mousemove 3 4 mouseup 1",
				"DISPLAY=:0 xdotool click --repeat 3 4",
			]
		);
	}

	#[tokio::test]
	async fn invalid_arguments_send_nothing() {
		let (desktop, runner) = desktop();

		let err = desktop.scroll(ScrollDirection::Down, 0).await.unwrap_err();
		assert!(matches!(err, Error::InvalidArgument(_)));
		let err = desktop.press_key(Vec::<String>::new()).await.unwrap_err();
		assert!(matches!(err, Error::InvalidArgument(_)));
		let err = desktop.type_text("a\0b").await.unwrap_err();
		assert!(matches!(err, Error::InvalidArgument(_)));
		let err = desktop.write("abc", 0, DEFAULT_TYPE_DELAY).await.unwrap_err();
		assert!(matches!(err, Error::InvalidArgument(_)));

		assert!(runner.commands().is_empty());
	}

	#[tokio::test]
	async fn press_key_maps_aliases() {
		let (desktop, runner) = desktop();
		desktop.press_key("Enter").await.unwrap();
		desktop.press_key(["ctrl", "alt", "delete"]).await.unwrap();

		assert_eq!(
			runner.commands(),
			["DISPLAY=:0 xdotool key Return", "DISPLAY=:0 xdotool key ctrl+alt+Delete"]
		);
	}

	#[tokio::test]
	async fn type_text_quotes_payload() {
		let (desktop, runner) = desktop();
		desktop.type_text("it's done").await.unwrap();

		let sent = runner.commands().remove(0);
		let words = shlex::split(&sent).unwrap();
		assert_eq!(words.last().map(String::as_str), Some("it's done"));
	}

	#[tokio::test]
	async fn write_splits_into_delayed_chunks() {
		let (desktop, runner) = desktop();
		desktop.write("abcdefg", 3, Duration::from_millis(75)).await.unwrap();

		assert_eq!(
			runner.commands(),
			[
				"DISPLAY=:0 xdotool type --delay 75 abc",
				"DISPLAY=:0 xdotool type --delay 75 def",
				"DISPLAY=:0 xdotool type --delay 75 g",
			]
		);
	}

	#[tokio::test]
	async fn write_stops_at_first_failure() {
		let runner = Arc::new(ScriptedRunner::new(|cmd| Err(exit(cmd, 1))));
		let desktop = Desktop::from_shared(runner.clone());
		let err = desktop.write("abcdef", 2, DEFAULT_TYPE_DELAY).await.unwrap_err();
		assert!(matches!(err, Error::Exec(_)));
		assert_eq!(runner.commands().len(), 1);
	}

	#[tokio::test]
	async fn open_and_launch() {
		let (desktop, runner) = desktop();
		desktop.open("https://example.com/a b").await.unwrap();
		desktop.launch_browser().await.unwrap();

		let sent = runner.commands();
		assert_eq!(sent.len(), 2);
		let words = shlex::split(&sent[0]).unwrap();
		assert_eq!(&words[..3], ["DISPLAY=:0", "nohup", "xdg-open"]);
		assert_eq!(words[3], "https://example.com/a b");
		assert_eq!(sent[1], "DISPLAY=:0 firefox > /dev/null 2>&1 &");
	}
}
