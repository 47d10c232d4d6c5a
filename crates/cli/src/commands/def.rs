//! Command plumbing: the execute contract and its outcome type.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::context::CommandContext;
use crate::error::Result;
use crate::output::Artifact;

/// Everything a command may touch while executing.
pub struct ExecCtx<'a> {
	pub ctx: &'a CommandContext,
}

/// Typed result of one command; the dispatcher wraps it in the envelope.
#[derive(Debug, Clone)]
pub struct CommandOutcome<T> {
	pub inputs: serde_json::Value,
	pub data: T,
	pub artifacts: Vec<Artifact>,
}

impl<T> CommandOutcome<T> {
	pub fn new(inputs: impl Serialize, data: T) -> Self {
		Self {
			inputs: serde_json::to_value(inputs).unwrap_or(serde_json::Value::Null),
			data,
			artifacts: Vec::new(),
		}
	}

	pub fn with_artifact(mut self, artifact: Artifact) -> Self {
		self.artifacts.push(artifact);
		self
	}
}

/// Boxing alias: stable async in trait without `async_trait`.
pub type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Each desktop command is `pub struct XxxCommand; impl CommandDef for XxxCommand { ... }`.
pub trait CommandDef: 'static {
	const NAME: &'static str;

	type Args;
	type Data: Serialize;

	/// Runs the command. **Must not print**; the dispatcher prints.
	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>>;
}
