
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use vdesk::{DEFAULT_CHUNK_SIZE, MouseButton};

use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Mouse button (CLI wrapper for [`vdesk::MouseButton`])
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CliButton {
	#[default]
	Left,
	Middle,
	Right,
}

impl From<CliButton> for MouseButton {
	fn from(button: CliButton) -> Self {
		match button {
			CliButton::Left => MouseButton::Left,
			CliButton::Middle => MouseButton::Middle,
			CliButton::Right => MouseButton::Right,
		}
	}
}

#[derive(Parser, Debug)]
#[command(name = "vdesk")]
#[command(about = "Drive a sandboxed X11/VNC desktop from the command line")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: toon (default), json, ndjson, or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "toon")]
	pub format: OutputFormat,

	/// X display to drive (overrides config; default :0)
	#[arg(long, global = true, value_name = "DISPLAY")]
	pub display: Option<String>,

	/// Run commands inside this docker container instead of the local shell
	#[arg(long, global = true, value_name = "NAME")]
	pub container: Option<String>,

	/// Config file (default: $XDG_CONFIG_HOME/vdesk/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Click a mouse button, optionally at X Y
	Click(ClickArgs),

	/// Move the pointer to X Y
	#[command(name = "move")]
	MoveTo(MoveArgs),

	/// Press at one point and release at another
	Drag(DragArgs),

	/// Scroll the wheel up or down
	Scroll(ScrollArgs),

	/// Type text into the focused window
	Type(TypeArgs),

	/// Press a key or chord (e.g. `press ctrl alt delete`)
	Press(PressArgs),

	/// Capture the screen as PNG
	Screenshot(ScreenshotArgs),

	/// Open a file or URL with the desktop's default handler
	Open(OpenArgs),

	/// Print the pointer position
	Cursor,

	/// Print the screen size in pixels
	ScreenSize,

	/// Query windows
	Window {
		#[command(subcommand)]
		action: WindowAction,
	},

	/// Wait for a readiness condition
	Wait(WaitArgs),

	/// Print the noVNC URL for this session
	StreamUrl(StreamUrlArgs),

	/// Show how key names map to X keysyms (no desktop needed)
	Keys(KeysArgs),
}

impl Commands {
	/// Name reported in the result envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Click(_) => "click",
			Commands::MoveTo(_) => "move",
			Commands::Drag(_) => "drag",
			Commands::Scroll(_) => "scroll",
			Commands::Type(_) => "type",
			Commands::Press(_) => "press",
			Commands::Screenshot(_) => "screenshot",
			Commands::Open(_) => "open",
			Commands::Cursor => "cursor",
			Commands::ScreenSize => "screen-size",
			Commands::Window { .. } => "window",
			Commands::Wait(_) => "wait",
			Commands::StreamUrl(_) => "stream-url",
			Commands::Keys(_) => "keys",
		}
	}
}

#[derive(Args, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickArgs {
	/// X coordinate (clicks at the current position when omitted)
	#[arg(requires = "y")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub x: Option<i32>,

	/// Y coordinate
	#[arg(requires = "x")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub y: Option<i32>,

	/// Button to click
	#[arg(short, long, value_enum, default_value = "left")]
	pub button: CliButton,

	/// Double click (left button only)
	#[arg(long, conflicts_with = "button")]
	pub double: bool,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct MoveArgs {
	pub x: i32,
	pub y: i32,
}

#[derive(Args, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragArgs {
	pub from_x: i32,
	pub from_y: i32,
	pub to_x: i32,
	pub to_y: i32,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct ScrollArgs {
	/// `up` or `down`
	#[arg(default_value = "down")]
	pub direction: String,

	/// Wheel notches
	#[arg(short, long, default_value_t = 1)]
	pub amount: u32,
}

#[derive(Args, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeArgs {
	pub text: String,

	/// Type in chunks of N characters with a per-key delay (N defaults to 25)
	#[arg(long, value_name = "N", num_args = 0..=1)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub chunk_size: Option<Option<usize>>,

	/// Per-key delay for chunked typing
	#[arg(long, value_name = "MS", default_value_t = 75, requires = "chunk_size")]
	pub delay_ms: u64,
}

impl TypeArgs {
	/// Chunk size when chunked typing was requested; a bare `--chunk-size`
	/// means [`DEFAULT_CHUNK_SIZE`].
	pub fn chunking(&self) -> Option<usize> {
		self.chunk_size.map(|n| n.unwrap_or(DEFAULT_CHUNK_SIZE))
	}
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct PressArgs {
	/// One key, or several to press together
	#[arg(required = true, num_args = 1..)]
	pub keys: Vec<String>,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct ScreenshotArgs {
	/// Local file to write the PNG to
	#[arg(short, long, value_name = "FILE", default_value = "screenshot.png")]
	pub output: PathBuf,

	/// Keep the capture at this path on the desktop instead of downloading it
	#[arg(long, value_name = "PATH", conflicts_with = "output")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub remote: Option<String>,
}

#[derive(Args, Debug, Clone, Serialize)]
pub struct OpenArgs {
	/// Path or URL
	pub target: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WindowAction {
	/// Print the focused window id
	Active,
	/// List ids of windows whose title matches NAME
	Find { name: String },
}

#[derive(Args, Debug, Clone)]
pub struct WaitArgs {
	#[command(subcommand)]
	pub condition: WaitCondition,

	/// Probe at most N times (overrides config)
	#[arg(long, global = true, value_name = "N")]
	pub attempts: Option<u32>,

	/// Delay between probes (overrides config)
	#[arg(long, global = true, value_name = "MS")]
	pub interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, Serialize)]
#[serde(tag = "condition", rename_all = "lowercase")]
pub enum WaitCondition {
	/// A process with exactly this name is running
	Process { name: String },
	/// The X server runs and answers queries
	Display,
	/// A window titled NAME exists
	Window { name: String },
	/// Firefox (focused) or Chrome has a window
	Browser,
	/// Firefox has a window; URL labels the wait
	Url { url: String },
	/// Something listens on PORT inside the session
	Port { port: u16 },
}

#[derive(Args, Debug, Clone)]
pub struct StreamUrlArgs {
	/// Forwarded noVNC port (overrides config)
	#[arg(long)]
	pub port: Option<u16>,

	/// Domain of forwarded ports (overrides config)
	#[arg(long)]
	pub domain: Option<String>,

	/// noVNC resize mode (scale, remote, off)
	#[arg(long)]
	pub resize: Option<String>,

	/// VNC password
	#[arg(long, value_name = "KEY")]
	pub auth_key: Option<String>,

	/// Do not connect automatically when the page loads
	#[arg(long)]
	pub no_auto_connect: bool,
}

#[derive(Args, Debug, Clone)]
pub struct KeysArgs {
	/// Key names to map; a chord when several are given
	pub names: Vec<String>,

	/// List every alias instead
	#[arg(long, conflicts_with = "names")]
	pub list: bool,
}
