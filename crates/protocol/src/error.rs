use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while rendering commands or interpreting their output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
	/// Rejected before any command was built.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Command output did not have the expected shape.
	#[error("could not parse {what} from output: {output:?}")]
	Parse { what: &'static str, output: String },
}

impl ProtocolError {
	pub(crate) fn invalid(msg: impl Into<String>) -> Self {
		Self::InvalidArgument(msg.into())
	}

	pub(crate) fn parse(what: &'static str, output: &str) -> Self {
		Self::Parse {
			what,
			output: output.to_string(),
		}
	}
}
