use thiserror::Error;
use vdesk_protocol::ProtocolError;
use vdesk_runtime::ExecError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Desktop`](crate::Desktop) actions and waiters.
#[derive(Debug, Error)]
pub enum Error {
	/// The command collaborator failed to run a command.
	#[error(transparent)]
	Exec(#[from] ExecError),

	/// A readiness wait used up its attempts.
	#[error("{description} not ready after {attempts} attempts")]
	Timeout { description: String, attempts: u32 },

	/// Rejected before any command was issued.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A query printed something unexpected.
	#[error("could not parse {what} from output: {output:?}")]
	Parse { what: &'static str, output: String },

	#[error("screenshot payload is not valid base64: {0}")]
	Decode(#[from] base64::DecodeError),
}

impl Error {
	/// Errors that no amount of polling will clear.
	pub fn is_fatal(&self) -> bool {
		match self {
			Self::Exec(err) => err.is_fatal(),
			Self::InvalidArgument(_) => true,
			_ => false,
		}
	}
}

impl From<ProtocolError> for Error {
	fn from(err: ProtocolError) -> Self {
		match err {
			ProtocolError::InvalidArgument(msg) => Self::InvalidArgument(msg),
			ProtocolError::Parse { what, output } => Self::Parse { what, output },
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn protocol_errors_keep_their_kind() {
		let err: Error = ProtocolError::InvalidArgument("empty chord".into()).into();
		assert!(matches!(err, Error::InvalidArgument(ref m) if m == "empty chord"));

		let err: Error = ProtocolError::Parse {
			what: "screen size",
			output: "junk".into(),
		}
		.into();
		assert!(matches!(err, Error::Parse { what: "screen size", .. }));
	}

	#[test]
	fn fatality() {
		assert!(Error::Exec(ExecError::Closed("s".into())).is_fatal());
		assert!(Error::InvalidArgument("x".into()).is_fatal());
		assert!(
			!Error::Exec(ExecError::NonZeroExit {
				command: "pgrep -x Xvfb".into(),
				code: Some(1),
				stdout: String::new(),
				stderr: String::new(),
			})
			.is_fatal()
		);
		assert!(
			!Error::Timeout {
				description: "display".into(),
				attempts: 3
			}
			.is_fatal()
		);
	}
}
