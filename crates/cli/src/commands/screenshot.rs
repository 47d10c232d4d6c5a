//! Screen capture to a local PNG, or kept on the desktop.

use serde::Serialize;
use tracing::info;
use vdesk::ScreenshotFormat;

use super::def::{BoxFut, CommandDef, CommandOutcome, ExecCtx};
use crate::cli::ScreenshotArgs;
use crate::error::Result;
use crate::output::{Artifact, ArtifactType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotData {
	pub path: String,
	/// Size of the PNG written locally; absent for remote captures.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bytes: Option<usize>,
	pub remote: bool,
}

pub struct ScreenshotCommand;

impl CommandDef for ScreenshotCommand {
	const NAME: &'static str = "screenshot";

	type Args = ScreenshotArgs;
	type Data = ScreenshotData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let desktop = &exec.ctx.desktop;

			if let Some(remote) = &args.remote {
				desktop.screenshot(ScreenshotFormat::Remote(remote.clone())).await?;
				info!(target = "vdesk", path = %remote, "screenshot kept on desktop");
				return Ok(CommandOutcome::new(
					args,
					ScreenshotData {
						path: remote.clone(),
						bytes: None,
						remote: true,
					},
				));
			}

			let png = desktop.screenshot(ScreenshotFormat::Bytes).await?.unwrap_or_default();
			if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
				tokio::fs::create_dir_all(parent).await?;
			}
			tokio::fs::write(&args.output, &png).await?;
			info!(target = "vdesk", path = %args.output.display(), bytes = png.len(), "screenshot saved");

			let artifact = Artifact {
				artifact_type: ArtifactType::Screenshot,
				path: args.output.clone(),
				size_bytes: Some(png.len() as u64),
			};
			Ok(CommandOutcome::new(
				args,
				ScreenshotData {
					path: args.output.display().to_string(),
					bytes: Some(png.len()),
					remote: false,
				},
			)
			.with_artifact(artifact))
		})
	}
}
