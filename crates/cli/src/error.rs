use std::path::PathBuf;

use pro::ProError;
use thiserror::Error;

use crate::output::ErrorCode;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Pro(#[from] ProError),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("could not parse session file {path}: {source}")]
	SessionFile {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("no config directory available, pass --session")]
	NoSessionPath,
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Pro(ProError::Transport(_)) => ErrorCode::TransportError,
			CliError::Pro(ProError::UnknownCommand(_)) => ErrorCode::UnknownCommand,
			CliError::Pro(ProError::Remote { .. }) => ErrorCode::RemoteError,
			CliError::Pro(ProError::Status { .. }) => ErrorCode::StatusError,
			CliError::NoSessionPath => ErrorCode::InvalidInput,
			CliError::Io(_) | CliError::SessionFile { .. } | CliError::Json(_) => ErrorCode::SessionError,
		}
	}
}
