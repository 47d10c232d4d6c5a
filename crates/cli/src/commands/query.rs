//! Read-only desktop queries.

use serde::Serialize;
use vdesk::{Point, ScreenSize};

use super::def::{BoxFut, CommandDef, CommandOutcome, ExecCtx};
use crate::cli::WindowAction;
use crate::error::Result;

pub struct CursorCommand;

impl CommandDef for CursorCommand {
	const NAME: &'static str = "cursor";

	type Args = ();
	type Data = Point;

	fn execute<'a>(_args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let point = exec.ctx.desktop.get_cursor_position().await?;
			Ok(CommandOutcome::new((), point))
		})
	}
}

pub struct ScreenSizeCommand;

impl CommandDef for ScreenSizeCommand {
	const NAME: &'static str = "screen-size";

	type Args = ();
	type Data = ScreenSize;

	fn execute<'a>(_args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let size = exec.ctx.desktop.get_screen_size().await?;
			Ok(CommandOutcome::new((), size))
		})
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowData {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub windows: Option<Vec<String>>,
}

pub struct WindowCommand;

impl CommandDef for WindowCommand {
	const NAME: &'static str = "window";

	type Args = WindowAction;
	type Data = WindowData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let desktop = &exec.ctx.desktop;
			match args {
				WindowAction::Active => {
					let id = desktop.get_active_window_id().await?;
					Ok(CommandOutcome::new(
						serde_json::json!({ "action": "active" }),
						WindowData {
							active: Some(id),
							windows: None,
						},
					))
				}
				WindowAction::Find { name } => {
					let ids = desktop.find_windows(name).await?;
					Ok(CommandOutcome::new(
						serde_json::json!({ "action": "find", "name": name }),
						WindowData {
							active: None,
							windows: Some(ids),
						},
					))
				}
			}
		})
	}
}
