//! Bounded, fixed-interval polling.
//!
//! The desktop has no push notifications, so readiness is approximated by
//! running a probe until it reports ready or the attempt budget runs out.
//! [`wait_for`] is the primitive; the [`Desktop`](crate::Desktop) waiters in
//! this module's `conditions` are probes over shell commands.

mod conditions;

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

/// Default delay between probe attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default attempt budget.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 30;

/// How often and how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
	pub max_attempts: u32,
	pub interval: Duration,
}

impl Default for PollPolicy {
	fn default() -> Self {
		Self {
			max_attempts: DEFAULT_POLL_ATTEMPTS,
			interval: DEFAULT_POLL_INTERVAL,
		}
	}
}

impl PollPolicy {
	/// `max_attempts` probes, one second apart.
	pub fn attempts(max_attempts: u32) -> Self {
		Self {
			max_attempts,
			..Self::default()
		}
	}

	pub fn with_interval(mut self, interval: Duration) -> Self {
		self.interval = interval;
		self
	}
}

/// Outcome of one probe attempt.
#[derive(Debug)]
pub enum Probe {
	Ready,
	NotReady,
	/// Polling cannot succeed; stop and return this error.
	Fault(Error),
}

impl Probe {
	/// Ready when `result` is `Ok(true)`.
	///
	/// Errors that a later attempt may clear (non-zero exits, spawn hiccups,
	/// unparsable output) count as not ready. Fatal ones become a fault.
	pub fn from_result(result: Result<bool>) -> Self {
		match result {
			Ok(true) => Self::Ready,
			Ok(false) => Self::NotReady,
			Err(err) if err.is_fatal() => Self::Fault(err),
			Err(err) => {
				trace!(target = "vdesk", error = %err, "probe failed");
				Self::NotReady
			}
		}
	}
}

impl From<bool> for Probe {
	fn from(ready: bool) -> Self {
		if ready { Self::Ready } else { Self::NotReady }
	}
}

/// Runs `probe` until it is ready, at most `policy.max_attempts` times.
///
/// Sleeps `policy.interval` between attempts, never after the last one. On
/// success the probe has run exactly as many times as it took; on timeout
/// exactly `max_attempts` times. A [`Probe::Fault`] ends the wait at once.
pub async fn wait_for<F, Fut>(mut probe: F, policy: PollPolicy, description: &str) -> Result<()>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Probe>,
{
	for attempt in 1..=policy.max_attempts {
		match probe().await {
			Probe::Ready => {
				debug!(target = "vdesk", condition = description, attempt, "ready");
				return Ok(());
			}
			Probe::Fault(err) => {
				warn!(target = "vdesk", condition = description, attempt, error = %err, "wait aborted");
				return Err(err);
			}
			Probe::NotReady => {
				debug!(target = "vdesk", condition = description, attempt, max = policy.max_attempts, "not ready");
			}
		}

		if attempt < policy.max_attempts {
			tokio::time::sleep(policy.interval).await;
		}
	}

	warn!(target = "vdesk", condition = description, attempts = policy.max_attempts, "wait timed out");
	Err(Error::Timeout {
		description: description.to_string(),
		attempts: policy.max_attempts,
	})
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use tokio::time::Instant;
	use vdesk_runtime::ExecError;

	use super::*;

	fn policy(n: u32) -> PollPolicy {
		PollPolicy::attempts(n)
	}

	#[tokio::test(start_paused = true)]
	async fn succeeds_on_kth_attempt_after_k_probes() {
		for k in 1..=5u32 {
			let calls = Cell::new(0u32);
			let started = Instant::now();
			wait_for(
				|| {
					calls.set(calls.get() + 1);
					let ready = calls.get() == k;
					async move { Probe::from(ready) }
				},
				policy(5),
				"thing",
			)
			.await
			.unwrap();
			assert_eq!(calls.get(), k);
			assert_eq!(started.elapsed(), Duration::from_secs(u64::from(k - 1)));
		}
	}

	#[tokio::test(start_paused = true)]
	async fn times_out_after_exactly_n_probes() {
		let calls = Cell::new(0u32);
		let started = Instant::now();
		let err = wait_for(
			|| {
				calls.set(calls.get() + 1);
				async { Probe::NotReady }
			},
			policy(4),
			"display",
		)
		.await
		.unwrap_err();

		assert_eq!(calls.get(), 4);
		assert_eq!(started.elapsed(), Duration::from_secs(3));
		match err {
			Error::Timeout { description, attempts } => {
				assert_eq!(description, "display");
				assert_eq!(attempts, 4);
			}
			other => panic!("unexpected error: {other}"),
		}
		assert_eq!(
			Error::Timeout {
				description: "display".into(),
				attempts: 4
			}
			.to_string(),
			"display not ready after 4 attempts"
		);
	}

	#[tokio::test(start_paused = true)]
	async fn zero_attempts_never_probes() {
		let calls = Cell::new(0u32);
		let err = wait_for(
			|| {
				calls.set(calls.get() + 1);
				async { Probe::Ready }
			},
			policy(0),
			"nothing",
		)
		.await
		.unwrap_err();
		assert_eq!(calls.get(), 0);
		assert!(matches!(err, Error::Timeout { attempts: 0, .. }));
	}

	#[tokio::test(start_paused = true)]
	async fn fault_aborts_immediately() {
		let calls = Cell::new(0u32);
		let err = wait_for(
			|| {
				calls.set(calls.get() + 1);
				async { Probe::from_result(Err(ExecError::Closed("s1".into()).into())) }
			},
			policy(10),
			"process",
		)
		.await
		.unwrap_err();
		assert_eq!(calls.get(), 1);
		assert!(matches!(err, Error::Exec(ExecError::Closed(_))));
	}

	#[tokio::test(start_paused = true)]
	async fn custom_interval() {
		let started = Instant::now();
		let _ = wait_for(|| async { Probe::NotReady }, policy(3).with_interval(Duration::from_millis(250)), "x").await;
		assert_eq!(started.elapsed(), Duration::from_millis(500));
	}

	#[test]
	fn transient_errors_are_not_ready() {
		let err = ExecError::NonZeroExit {
			command: "pgrep -x Xvfb > /dev/null".into(),
			code: Some(1),
			stdout: String::new(),
			stderr: String::new(),
		};
		assert!(matches!(Probe::from_result(Err(err.into())), Probe::NotReady));
		assert!(matches!(
			Probe::from_result(Err(Error::Parse {
				what: "screen size",
				output: String::new()
			})),
			Probe::NotReady
		));
		assert!(matches!(Probe::from_result(Ok(true)), Probe::Ready));
		assert!(matches!(Probe::from_result(Ok(false)), Probe::NotReady));
	}
}
