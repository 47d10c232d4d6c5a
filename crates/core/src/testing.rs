//! Scripted [`CommandRunner`] for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use vdesk_runtime::{CommandRunner, ExecError};

type Responder = Box<dyn Fn(&str) -> Result<String, ExecError> + Send + Sync>;

/// Records every command and answers with a caller-supplied function.
pub(crate) struct ScriptedRunner {
	log: Mutex<Vec<String>>,
	respond: Responder,
}

impl ScriptedRunner {
	/// Every command succeeds with empty output.
	pub(crate) fn ok() -> Self {
		Self::new(|_| Ok(String::new()))
	}

	pub(crate) fn new(respond: impl Fn(&str) -> Result<String, ExecError> + Send + Sync + 'static) -> Self {
		Self {
			log: Mutex::new(Vec::new()),
			respond: Box::new(respond),
		}
	}

	pub(crate) fn commands(&self) -> Vec<String> {
		self.log.lock().unwrap().clone()
	}

	/// Number of recorded commands containing `needle`.
	pub(crate) fn count(&self, needle: &str) -> usize {
		self.log.lock().unwrap().iter().filter(|c| c.contains(needle)).count()
	}
}

/// Failure shaped like a command that exited with `code` and printed nothing.
pub(crate) fn exit(command: &str, code: i32) -> ExecError {
	ExecError::NonZeroExit {
		command: command.to_string(),
		code: Some(code),
		stdout: String::new(),
		stderr: String::new(),
	}
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
	async fn run(&self, command: &str) -> Result<(), ExecError> {
		self.run_capture(command).await.map(|_| ())
	}

	async fn run_capture(&self, command: &str) -> Result<String, ExecError> {
		self.log.lock().unwrap().push(command.to_string());
		(self.respond)(command)
	}

	fn session_id(&self) -> &str {
		"i3k9x2"
	}

	fn endpoint_id(&self) -> &str {
		"a1b2c3"
	}

	async fn close(&self) -> Result<(), ExecError> {
		Ok(())
	}
}
