//! Renders desktop actions as shell commands.
//!
//! Every X command is prefixed with `DISPLAY=<display>` so it targets the
//! virtual screen regardless of the remote shell's environment. Values that
//! originate from callers (typed text, window names, paths) are quoted with
//! [`shlex`]; numeric arguments are formatted literally.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::keys::KeyPress;

/// Display used when none is configured.
pub const DEFAULT_DISPLAY: &str = ":0";

/// Process name of the virtual X server.
pub const X_SERVER_PROCESS: &str = "Xvfb";

static DISPLAY_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]*:\d+(\.\d+)?$").expect("display pattern is valid"));

/// Screen coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
	pub x: i32,
	pub y: i32,
}

impl Point {
	pub fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.x, self.y)
	}
}

/// X pointer button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
	#[default]
	Left,
	Middle,
	Right,
}

impl MouseButton {
	/// xdotool button number.
	pub fn code(self) -> u8 {
		match self {
			Self::Left => 1,
			Self::Middle => 2,
			Self::Right => 3,
		}
	}
}

/// Wheel direction, expressed as X buttons 4 and 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
	Up,
	#[default]
	Down,
}

impl ScrollDirection {
	pub fn button(self) -> u8 {
		match self {
			Self::Up => 4,
			Self::Down => 5,
		}
	}
}

impl FromStr for ScrollDirection {
	type Err = ProtocolError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"up" => Ok(Self::Up),
			"down" => Ok(Self::Down),
			other => Err(ProtocolError::invalid(format!("invalid scroll direction: {other}"))),
		}
	}
}

/// Quotes `value` for a POSIX shell. NUL bytes cannot be represented.
pub fn quote(value: &str) -> Result<Cow<'_, str>> {
	shlex::try_quote(value).map_err(|_| ProtocolError::invalid("argument contains a NUL byte"))
}

/// `pgrep -x <name>`, exit status only.
pub fn process_running(name: &str) -> Result<String> {
	if name.is_empty() {
		return Err(ProtocolError::invalid("process name must not be empty"));
	}
	Ok(format!("pgrep -x {} > /dev/null", quote(name)?))
}

/// Succeeds when something listens on TCP/UDP `port`.
pub fn port_listening(port: u16) -> String {
	format!("netstat -tuln | grep ':{port} '")
}

/// Prints a file as a single base64 line.
pub fn read_base64(path: &str) -> Result<String> {
	Ok(format!("base64 -w 0 {}", quote(path)?))
}

pub fn remove_file(path: &str) -> Result<String> {
	Ok(format!("rm -f {}", quote(path)?))
}

/// Command renderer bound to one X display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xdo {
	display: String,
}

impl Default for Xdo {
	fn default() -> Self {
		Self {
			display: DEFAULT_DISPLAY.to_string(),
		}
	}
}

impl Xdo {
	/// Accepts displays of the form `[host]:N[.S]`.
	pub fn new(display: impl Into<String>) -> Result<Self> {
		let display = display.into();
		if !DISPLAY_RE.is_match(&display) {
			return Err(ProtocolError::invalid(format!("invalid X display: {display:?}")));
		}
		Ok(Self { display })
	}

	pub fn display(&self) -> &str {
		&self.display
	}

	fn x(&self, args: impl fmt::Display) -> String {
		format!("DISPLAY={} {args}", self.display)
	}

	/// Clicks `button` at `at`, or where the pointer already is.
	pub fn click(&self, button: MouseButton, at: Option<Point>) -> String {
		self.click_with(&format!("click {}", button.code()), at)
	}

	pub fn double_click(&self, at: Option<Point>) -> String {
		self.click_with("click --repeat 2 1", at)
	}

	fn click_with(&self, click: &str, at: Option<Point>) -> String {
		match at {
			Some(p) => self.x(format_args!("xdotool mousemove {p} {click}")),
			None => self.x(format_args!("xdotool {click}")),
		}
	}

	pub fn move_mouse(&self, to: Point) -> String {
		self.x(format_args!("xdotool mousemove {to}"))
	}

	pub fn mouse_down(&self, button: MouseButton) -> String {
		self.x(format_args!("xdotool mousedown {}", button.code()))
	}

	pub fn mouse_up(&self, button: MouseButton) -> String {
		self.x(format_args!("xdotool mouseup {}", button.code()))
	}

	/// Press at `from`, move to `to`, release. One command so no other input
	/// can interleave.
	pub fn drag(&self, from: Point, to: Point) -> String {
		self.x(format_args!("xdotool mousemove {from} mousedown 1 mousemove {to} mouseup 1"))
	}

	pub fn scroll(&self, direction: ScrollDirection, amount: u32) -> Result<String> {
		if amount == 0 {
			return Err(ProtocolError::invalid("scroll amount must be at least 1"));
		}
		Ok(self.x(format_args!("xdotool click --repeat {amount} {}", direction.button())))
	}

	pub fn type_text(&self, text: &str) -> Result<String> {
		Ok(self.x(format_args!("xdotool type {}", quote(text)?)))
	}

	/// Types with a per-keystroke delay, for chunked writes.
	pub fn type_delayed(&self, text: &str, delay_ms: u64) -> Result<String> {
		Ok(self.x(format_args!("xdotool type --delay {delay_ms} {}", quote(text)?)))
	}

	pub fn key(&self, key: &KeyPress) -> Result<String> {
		let keysym = key.keysym()?;
		Ok(self.x(format_args!("xdotool key {}", quote(&keysym)?)))
	}

	/// Opens a file or URL with the desktop's default handler, detached.
	pub fn open(&self, target: &str) -> Result<String> {
		if target.is_empty() {
			return Err(ProtocolError::invalid("nothing to open"));
		}
		Ok(self.x(format_args!("nohup xdg-open {} > /dev/null 2>&1 &", quote(target)?)))
	}

	pub fn launch_browser(&self) -> String {
		self.x("firefox > /dev/null 2>&1 &")
	}

	pub fn cursor_location(&self) -> String {
		self.x("xdotool getmouselocation --shell")
	}

	pub fn screen_dimensions(&self) -> String {
		self.x("xdpyinfo | grep dimensions")
	}

	pub fn active_window(&self) -> String {
		self.x("xdotool getactivewindow")
	}

	pub fn search_windows(&self, name: &str) -> Result<String> {
		Ok(self.x(format_args!("xdotool search --name {}", quote(name)?)))
	}

	/// Captures the screen, pointer included, into `path` on the remote side.
	pub fn screenshot(&self, path: &str) -> Result<String> {
		Ok(self.x(format_args!("scrot --pointer {}", quote(path)?)))
	}
}
