//! Interpreting the stdout of query commands.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::command::Point;
use crate::error::{ProtocolError, Result};

static DIMENSIONS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"dimensions:\s+(\d+)x(\d+)").expect("dimensions pattern is valid"));

/// Width and height of the X screen in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
	pub width: u32,
	pub height: u32,
}

/// Parses `xdotool getmouselocation --shell`:
///
/// ```text
/// X=512
/// Y=384
/// SCREEN=0
/// WINDOW=23068679
/// ```
pub fn mouse_location(output: &str) -> Result<Point> {
	let mut x = None;
	let mut y = None;
	for line in output.lines().map(str::trim) {
		if let Some(v) = line.strip_prefix("X=") {
			x = v.parse::<i32>().ok();
		} else if let Some(v) = line.strip_prefix("Y=") {
			y = v.parse::<i32>().ok();
		}
	}
	match (x, y) {
		(Some(x), Some(y)) => Ok(Point { x, y }),
		_ => Err(ProtocolError::parse("cursor position", output)),
	}
}

/// Parses the `dimensions:` line of `xdpyinfo`, e.g.
/// `  dimensions:    1024x768 pixels (271x203 millimeters)`.
pub fn screen_dimensions(output: &str) -> Result<ScreenSize> {
	let caps = DIMENSIONS_RE
		.captures(output)
		.ok_or_else(|| ProtocolError::parse("screen size", output))?;
	let width = caps[1].parse().map_err(|_| ProtocolError::parse("screen width", output))?;
	let height = caps[2].parse().map_err(|_| ProtocolError::parse("screen height", output))?;
	Ok(ScreenSize { width, height })
}

/// One window id per non-blank line.
pub fn window_ids(output: &str) -> Vec<String> {
	output
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}
