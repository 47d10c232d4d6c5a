use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Directive for a `-v` count; `RUST_LOG` wins when set.
fn default_filter(verbosity: u8) -> &'static str {
	// 0 = warnings only (timeouts, failed cleanup)
	// 1 (-v) = waits and session lifecycle
	// 2 (-vv) = every command sent and each poll attempt
	// 3+ = probe failures and exec details
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}
