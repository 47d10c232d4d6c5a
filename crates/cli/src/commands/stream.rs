//! noVNC viewer URL for the current session.

use serde::Serialize;
use vdesk::StreamConfig;

use super::def::{BoxFut, CommandDef, CommandOutcome, ExecCtx};
use crate::cli::StreamUrlArgs;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamUrlData {
	pub url: String,
}

/// Flags win over the config's stream settings.
pub(crate) fn effective_stream(base: &StreamConfig, args: &StreamUrlArgs) -> StreamConfig {
	let mut config = base.clone();
	if let Some(port) = args.port {
		config.port = port;
	}
	if let Some(domain) = &args.domain {
		config.domain = domain.clone();
	}
	if let Some(resize) = &args.resize {
		config.resize = Some(resize.clone()).filter(|r| r != "off");
	}
	if args.auth_key.is_some() {
		config.auth_key = args.auth_key.clone();
	}
	if args.no_auto_connect {
		config.auto_connect = false;
	}
	config
}

pub struct StreamUrlCommand;

impl CommandDef for StreamUrlCommand {
	const NAME: &'static str = "stream-url";

	type Args = StreamUrlArgs;
	type Data = StreamUrlData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let config = effective_stream(&exec.ctx.stream, args);
			let url = exec.ctx.desktop.stream_url(&config)?;
			Ok(CommandOutcome::new(
				serde_json::json!({ "port": config.port, "domain": config.domain }),
				StreamUrlData { url: url.into() },
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args() -> StreamUrlArgs {
		StreamUrlArgs {
			port: None,
			domain: None,
			resize: None,
			auth_key: None,
			no_auto_connect: false,
		}
	}

	#[test]
	fn no_flags_keeps_config() {
		let base = StreamConfig::default();
		assert_eq!(effective_stream(&base, &args()), base);
	}

	#[test]
	fn flags_override_config() {
		let config = effective_stream(
			&StreamConfig::default(),
			&StreamUrlArgs {
				port: Some(6081),
				domain: Some("example.dev".into()),
				resize: Some("off".into()),
				auth_key: Some("secret".into()),
				no_auto_connect: true,
			},
		);
		assert_eq!(config.port, 6081);
		assert_eq!(config.domain, "example.dev");
		assert_eq!(config.resize, None);
		assert_eq!(config.auth_key.as_deref(), Some("secret"));
		assert!(!config.auto_connect);
	}
}
