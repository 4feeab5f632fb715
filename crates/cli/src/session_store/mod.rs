//! Persistent session storage for CLI state across invocations.
//!
//! The session lives in a single JSON file, by default
//! `~/.config/pro/session.json`. A missing file yields a fresh session with a
//! newly generated device id; a corrupt file is an error rather than a silent
//! reset, since it holds the account token.

use std::fs;
use std::path::{Path, PathBuf};

use pro::MemorySession;
use uuid::Uuid;

use crate::cli::SessionSetArgs;
use crate::error::{CliError, Result};


const DEFAULT_DEVICE_NAME: &str = "pro-cli";

/// Default session file location.
pub fn default_session_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("pro").join("session.json"))
}

/// A session file and its loaded contents.
#[derive(Debug)]
pub struct SessionStore {
	path: PathBuf,
	pub session: MemorySession,
}

impl SessionStore {
	pub fn open(path: Option<PathBuf>) -> Result<Self> {
		let path = path.or_else(default_session_path).ok_or(CliError::NoSessionPath)?;
		let session = load_session(&path)?;
		Ok(Self { path, session })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn save(&self) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)?;
			}
		}
		let json = serde_json::to_string_pretty(&self.session)?;
		fs::write(&self.path, json)?;
		Ok(())
	}

	/// Removes the session file if present.
	pub fn clear(&mut self) -> Result<bool> {
		self.session = fresh_session();
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(err) => Err(err.into()),
		}
	}

	/// Applies the fields present in `args`.
	pub fn apply(&mut self, args: SessionSetArgs) {
		let session = &mut self.session;
		let fields = [
			(args.device_id, &mut session.device_id),
			(args.device_name, &mut session.device_name),
			(args.locale, &mut session.locale),
			(args.email, &mut session.email),
			(args.plan, &mut session.plan),
			(args.currency, &mut session.currency),
			(args.stripe_token, &mut session.stripe_token),
			(args.stripe_api_key, &mut session.stripe_api_key),
			(args.verify_code, &mut session.verify_code),
			(args.referral, &mut session.referral),
			(args.device_code, &mut session.device_code),
		];
		for (value, slot) in fields {
			if let Some(value) = value {
				*slot = value;
			}
		}
	}
}

fn fresh_session() -> MemorySession {
	MemorySession::for_device(Uuid::new_v4().to_string(), DEFAULT_DEVICE_NAME)
}

fn load_session(path: &Path) -> Result<MemorySession> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(fresh_session()),
		Err(err) => return Err(err.into()),
	};
	serde_json::from_str(&content).map_err(|source| CliError::SessionFile {
		path: path.to_path_buf(),
		source,
	})
}
