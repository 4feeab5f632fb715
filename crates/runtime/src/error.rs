//! Error types for transport construction and remote calls.

use pro_protocol::Response;
use thiserror::Error;

/// Result alias for remote calls.
pub type Result<T> = std::result::Result<T, ClientError>;

/// The HTTP client could not be constructed. No request was attempted.
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("proxying requested but no proxy URL is configured")]
	ProxyNotConfigured,

	#[error("invalid proxy URL {url}: {source}")]
	InvalidProxy {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("invalid server URL {url}: {source}")]
	InvalidServerUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("failed to build HTTP client: {0}")]
	Build(#[source] reqwest::Error),
}

/// A remote call failed before a successful response envelope was decoded.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("could not reach server: {0}")]
	Connection(String),

	#[error("request failed: {0}")]
	Http(#[source] reqwest::Error),

	#[error("server replied with HTTP {0}")]
	Status(u16),

	/// Non-2xx reply whose body still decoded as a response envelope.
	#[error("server rejected request with HTTP {status}: {}", .response.error)]
	Rejected { status: u16, response: Box<Response> },

	#[error("malformed response body: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("invalid request URL: {0}")]
	Url(#[from] url::ParseError),
}

impl ClientError {
	/// Returns the response envelope that accompanied this error, if any.
	pub fn response(&self) -> Option<&Response> {
		match self {
			ClientError::Rejected { response, .. } => Some(response.as_ref()),
			_ => None,
		}
	}
}

impl From<reqwest::Error> for ClientError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_connect() || err.is_timeout() {
			ClientError::Connection(err.to_string())
		} else {
			ClientError::Http(err)
		}
	}
}
