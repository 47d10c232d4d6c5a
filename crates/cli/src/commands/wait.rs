//! Readiness waits.
//!
//! ```bash
//! vdesk wait display --attempts 60        # X server up and answering
//! vdesk wait process xfce4-session
//! vdesk wait window "Mozilla Firefox" --interval-ms 500
//! vdesk wait browser
//! vdesk wait port 6080
//! ```

use std::time::{Duration, Instant};

use serde::Serialize;
use vdesk::PollPolicy;

use super::def::{BoxFut, CommandDef, CommandOutcome, ExecCtx};
use crate::cli::{WaitArgs, WaitCondition};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitData {
	pub condition: String,
	pub waited_ms: u64,
	pub max_attempts: u32,
	pub interval_ms: u64,
}

/// Flags win over the config's poll settings.
pub(crate) fn effective_policy(base: PollPolicy, args: &WaitArgs) -> PollPolicy {
	let mut policy = base;
	if let Some(attempts) = args.attempts {
		policy.max_attempts = attempts;
	}
	if let Some(ms) = args.interval_ms {
		policy.interval = Duration::from_millis(ms);
	}
	policy
}

fn describe(condition: &WaitCondition) -> String {
	match condition {
		WaitCondition::Process { name } => format!("process:{name}"),
		WaitCondition::Display => "display".to_string(),
		WaitCondition::Window { name } => format!("window:{name}"),
		WaitCondition::Browser => "browser".to_string(),
		WaitCondition::Url { url } => format!("url:{url}"),
		WaitCondition::Port { port } => format!("port:{port}"),
	}
}

pub struct WaitCommand;

impl CommandDef for WaitCommand {
	const NAME: &'static str = "wait";

	type Args = WaitArgs;
	type Data = WaitData;

	fn execute<'a>(args: &'a Self::Args, exec: ExecCtx<'a>) -> BoxFut<'a, Result<CommandOutcome<Self::Data>>> {
		Box::pin(async move {
			let desktop = &exec.ctx.desktop;
			let policy = effective_policy(exec.ctx.poll, args);
			let started = Instant::now();

			match &args.condition {
				WaitCondition::Process { name } => desktop.wait_for_process(name, policy).await?,
				WaitCondition::Display => desktop.wait_for_display(policy).await?,
				WaitCondition::Window { name } => desktop.wait_for_window(name, policy).await?,
				WaitCondition::Browser => desktop.wait_for_browser(policy).await?,
				WaitCondition::Url { url } => desktop.wait_for_url(url, policy).await?,
				WaitCondition::Port { port } => desktop.wait_for_port(*port, policy).await?,
			}

			Ok(CommandOutcome::new(
				&args.condition,
				WaitData {
					condition: describe(&args.condition),
					waited_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
					max_attempts: policy.max_attempts,
					interval_ms: u64::try_from(policy.interval.as_millis()).unwrap_or(u64::MAX),
				},
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(attempts: Option<u32>, interval_ms: Option<u64>) -> WaitArgs {
		WaitArgs {
			condition: WaitCondition::Display,
			attempts,
			interval_ms,
		}
	}

	#[test]
	fn flags_override_policy() {
		let base = PollPolicy::attempts(30);
		assert_eq!(effective_policy(base, &args(None, None)), base);
		assert_eq!(
			effective_policy(base, &args(Some(3), Some(100))),
			PollPolicy::attempts(3).with_interval(Duration::from_millis(100))
		);
	}

	#[test]
	fn condition_labels() {
		assert_eq!(describe(&WaitCondition::Port { port: 5900 }), "port:5900");
		assert_eq!(describe(&WaitCondition::Process { name: "Xvfb".into() }), "process:Xvfb");
	}
}
