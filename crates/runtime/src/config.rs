//! Client configuration.

use std::time::Duration;

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8787/";
/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SERVER_URL_ENV: &str = "PRO_SERVER_URL";
const PROXY_URL_ENV: &str = "PRO_PROXY_URL";
const TIMEOUT_MS_ENV: &str = "PRO_TIMEOUT_MS";

/// Settings for building the HTTP transport and remote client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL every operation path is joined onto.
	pub base_url: String,
	/// Proxy used when a request is made with proxying enabled.
	pub proxy_url: Option<String>,
	pub timeout: Duration,
	pub user_agent: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_SERVER_URL.to_string(),
			proxy_url: None,
			timeout: DEFAULT_TIMEOUT,
			user_agent: concat!("pro-rs/", env!("CARGO_PKG_VERSION")).to_string(),
		}
	}
}

impl ClientConfig {
	/// Defaults overridden by `PRO_SERVER_URL`, `PRO_PROXY_URL` and
	/// `PRO_TIMEOUT_MS`. Unparseable timeouts are ignored.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Self::default();
		if let Some(url) = lookup(SERVER_URL_ENV).filter(|v| !v.trim().is_empty()) {
			config.base_url = url;
		}
		config.proxy_url = lookup(PROXY_URL_ENV).filter(|v| !v.trim().is_empty());
		if let Some(ms) = lookup(TIMEOUT_MS_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
			config.timeout = Duration::from_millis(ms);
		}
		config
	}

	pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();
		self
	}

	pub fn with_proxy_url(mut self, url: Option<String>) -> Self {
		self.proxy_url = url;
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		move |key| vars.get(key).cloned()
	}

	#[test]
	fn defaults_without_environment() {
		let config = ClientConfig::from_lookup(lookup(&[]));
		assert_eq!(config, ClientConfig::default());
		assert!(config.proxy_url.is_none());
	}

	#[test]
	fn environment_overrides_defaults() {
		let config = ClientConfig::from_lookup(lookup(&[
			("PRO_SERVER_URL", "https://pro.test/api/"),
			("PRO_PROXY_URL", "http://127.0.0.1:3128"),
			("PRO_TIMEOUT_MS", "1500"),
		]));
		assert_eq!(config.base_url, "https://pro.test/api/");
		assert_eq!(config.proxy_url.as_deref(), Some("http://127.0.0.1:3128"));
		assert_eq!(config.timeout, Duration::from_millis(1500));
	}

	#[test]
	fn blank_and_invalid_values_are_ignored() {
		let config = ClientConfig::from_lookup(lookup(&[("PRO_SERVER_URL", "  "), ("PRO_PROXY_URL", ""), ("PRO_TIMEOUT_MS", "soon")]));
		assert_eq!(config, ClientConfig::default());
	}
}
