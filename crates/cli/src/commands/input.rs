//! Pointer and keyboard commands.

use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tracing::info;
use vdesk::{KeyPress, MouseButton, Point, ScrollDirection};

use super::def::{BoxFut, CommandDef, CommandOutcome, ExecCtx};
use crate::cli::{ClickArgs, DragArgs, MoveArgs, OpenArgs, PressArgs, ScrollArgs, TypeArgs};
use crate::error::{CliError, Result};

/// Result of a command that only has a side effect.
#[derive(Debug, Clone, Serialize)]
pub struct ActionData {
	/// What was done, e.g. `right click at 10 20`.
	pub action: String,
}

impl ActionData {
	fn new(action: impl Into<String>) -> Self {
		Self { action: action.into() }
	}
}

fn describe_button(button: MouseButton) -> &'static str {
	match button {
		MouseButton::Left => "left",
		MouseButton::Middle => "middle",
		MouseButton::Right => "right",
	}
}

pub struct ClickCommand;

impl CommandDef for ClickCommand {
	const NAME: &'static str = "click";

	type Args = ClickArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let desktop = &exec.ctx.desktop;
			let at = match (args.x, args.y) {
				(Some(x), Some(y)) => Some(Point::new(x, y)),
				(None, None) => None,
				_ => return Err(CliError::InvalidInput("click needs both X and Y, or neither".into())),
			};

			let label = if args.double {
				desktop.double_click(at).await?;
				"double click"
			} else {
				let button = MouseButton::from(args.button);
				desktop.click(button, at).await?;
				describe_button(button)
			};

			let action = match at {
				Some(p) if args.double => format!("{label} at {p}"),
				Some(p) => format!("{label} click at {p}"),
				None if args.double => label.to_string(),
				None => format!("{label} click"),
			};
			info!(target = "vdesk", %action, "click");
			Ok(CommandOutcome::new(args, ActionData::new(action)))
		})
	}
}

pub struct MoveCommand;

impl CommandDef for MoveCommand {
	const NAME: &'static str = "move";

	type Args = MoveArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			exec.ctx.desktop.move_mouse(args.x, args.y).await?;
			Ok(CommandOutcome::new(args, ActionData::new(format!("moved to {} {}", args.x, args.y))))
		})
	}
}

pub struct DragCommand;

impl CommandDef for DragCommand {
	const NAME: &'static str = "drag";

	type Args = DragArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let from = Point::new(args.from_x, args.from_y);
			let to = Point::new(args.to_x, args.to_y);
			exec.ctx.desktop.drag(from, to).await?;
			Ok(CommandOutcome::new(args, ActionData::new(format!("dragged {from} to {to}"))))
		})
	}
}

pub struct ScrollCommand;

impl CommandDef for ScrollCommand {
	const NAME: &'static str = "scroll";

	type Args = ScrollArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let direction: ScrollDirection = args.direction.parse().map_err(vdesk::Error::from)?;
			exec.ctx.desktop.scroll(direction, args.amount).await?;
			Ok(CommandOutcome::new(
				args,
				ActionData::new(format!("scrolled {} {}", args.direction, args.amount)),
			))
		})
	}
}

pub struct TypeCommand;

impl CommandDef for TypeCommand {
	const NAME: &'static str = "type";

	type Args = TypeArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let desktop = &exec.ctx.desktop;
			let chunk_size = args.chunking();
			match chunk_size {
				Some(chunk) => desktop.write(&args.text, chunk, Duration::from_millis(args.delay_ms)).await?,
				None => desktop.type_text(&args.text).await?,
			}
			let chars = args.text.chars().count();
			Ok(CommandOutcome::new(
				json!({ "chars": chars, "chunkSize": chunk_size }),
				ActionData::new(format!("typed {chars} characters")),
			))
		})
	}
}

pub struct PressCommand;

impl CommandDef for PressCommand {
	const NAME: &'static str = "press";

	type Args = PressArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let key = KeyPress::from_names(args.keys.clone());
			let keysym = key.keysym().map_err(vdesk::Error::from)?;
			exec.ctx.desktop.press_key(key).await?;
			Ok(CommandOutcome::new(args, ActionData::new(format!("pressed {keysym}"))))
		})
	}
}

pub struct OpenCommand;

impl CommandDef for OpenCommand {
	const NAME: &'static str = "open";

	type Args = OpenArgs;
	type Data = ActionData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			exec.ctx.desktop.open(&args.target).await?;
			Ok(CommandOutcome::new(args, ActionData::new(format!("opened {}", args.target))))
		})
	}
}
