//! Failure taxonomy for dispatched commands.

use pro_runtime::{ClientError, TransportError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProError>;

#[derive(Debug, Error)]
pub enum ProError {
	/// The transport could not be built; nothing was sent.
	#[error("could not create request: {0}")]
	Transport(#[from] TransportError),

	#[error("unknown command: {0}")]
	UnknownCommand(String),

	/// The remote call itself failed.
	#[error("{command} request failed: {source}")]
	Remote {
		command: String,
		#[source]
		source: ClientError,
	},

	/// The call completed but the server reported a non-"ok" status.
	#[error("{command} request returned status {status:?}: {message}")]
	Status { command: String, status: String, message: String },
}

impl ProError {
	/// Command the failure belongs to, when one was resolved.
	pub fn command(&self) -> Option<&str> {
		match self {
			ProError::Transport(_) => None,
			ProError::UnknownCommand(command) | ProError::Remote { command, .. } | ProError::Status { command, .. } => Some(command),
		}
	}
}
