//! Command dispatch: builds the desktop once, runs one command, prints the envelope.

pub mod def;
mod input;
mod keys;
mod query;
mod screenshot;
mod stream;
mod wait;

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use self::def::{CommandDef, CommandOutcome, ExecCtx};
use crate::cli::{Cli, Commands};
use crate::config;
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, SessionInfo, print_result};

pub async fn dispatch(cli: Cli, format: OutputFormat) -> Result<()> {
	// Offline: no config or session needed
	if let Commands::Keys(args) = &cli.command {
		let start = Instant::now();
		let (inputs, data) = keys::execute(args)?;
		emit_success(keys::NAME, start, CommandOutcome::new(inputs, data), None, format);
		return Ok(());
	}

	let config = config::load(cli.config.as_deref())?;
	let ctx = CommandContext::build(&cli, config)?;

	match &cli.command {
		Commands::Click(args) => run::<input::ClickCommand>(args, &ctx, format).await,
		Commands::MoveTo(args) => run::<input::MoveCommand>(args, &ctx, format).await,
		Commands::Drag(args) => run::<input::DragCommand>(args, &ctx, format).await,
		Commands::Scroll(args) => run::<input::ScrollCommand>(args, &ctx, format).await,
		Commands::Type(args) => run::<input::TypeCommand>(args, &ctx, format).await,
		Commands::Press(args) => run::<input::PressCommand>(args, &ctx, format).await,
		Commands::Open(args) => run::<input::OpenCommand>(args, &ctx, format).await,
		Commands::Screenshot(args) => run::<screenshot::ScreenshotCommand>(args, &ctx, format).await,
		Commands::Cursor => run::<query::CursorCommand>(&(), &ctx, format).await,
		Commands::ScreenSize => run::<query::ScreenSizeCommand>(&(), &ctx, format).await,
		Commands::Window { action } => run::<query::WindowCommand>(action, &ctx, format).await,
		Commands::Wait(args) => run::<wait::WaitCommand>(args, &ctx, format).await,
		Commands::StreamUrl(args) => run::<stream::StreamUrlCommand>(args, &ctx, format).await,
		Commands::Keys(_) => unreachable!("handled above"),
	}
}

async fn run<C: CommandDef>(args: &C::Args, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
	let start = Instant::now();
	debug!(target = "vdesk", command = C::NAME, "execute");
	let outcome = C::execute(args, ExecCtx { ctx }).await?;
	emit_success(C::NAME, start, outcome, Some(ctx.session.clone()), format);
	Ok(())
}

fn emit_success<T: Serialize>(
	command: &'static str,
	start: Instant,
	outcome: CommandOutcome<T>,
	session: Option<SessionInfo>,
	format: OutputFormat,
) {
	let mut builder = ResultBuilder::started_at(command, start).inputs(outcome.inputs).data(outcome.data);
	for artifact in outcome.artifacts {
		builder = builder.artifact(artifact);
	}
	if let Some(session) = session {
		builder = builder.session(session);
	}
	print_result(&builder.build(), format);
}
