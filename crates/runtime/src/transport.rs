//! HTTP transport construction.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Builds the HTTP client for one request context.
///
/// With `should_proxy` set, all traffic goes through `config.proxy_url`, and a
/// missing or malformed proxy URL is an error. Without it, system proxies are
/// ignored so the flag is the only switch.
pub fn build_http_client(config: &ClientConfig, should_proxy: bool) -> Result<reqwest::Client, TransportError> {
	let builder = reqwest::Client::builder().timeout(config.timeout).user_agent(config.user_agent.as_str());

	let builder = if should_proxy {
		let url = config
			.proxy_url
			.as_deref()
			.filter(|url| !url.trim().is_empty())
			.ok_or(TransportError::ProxyNotConfigured)?;
		let proxy = reqwest::Proxy::all(url).map_err(|source| TransportError::InvalidProxy {
			url: url.to_string(),
			source,
		})?;
		debug!(target = "pro", proxy = %url, "building proxied HTTP client");
		builder.proxy(proxy)
	} else {
		builder.no_proxy()
	};

	builder.build().map_err(TransportError::Build)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn direct_client_builds_without_proxy_config() {
		assert!(build_http_client(&ClientConfig::default(), false).is_ok());
	}

	#[test]
	fn proxied_client_requires_proxy_url() {
		let err = build_http_client(&ClientConfig::default(), true).unwrap_err();
		assert!(matches!(err, TransportError::ProxyNotConfigured));
	}

	#[test]
	fn proxied_client_builds_with_proxy_url() {
		let config = ClientConfig::default().with_proxy_url(Some("http://127.0.0.1:3128".into()));
		assert!(build_http_client(&config, true).is_ok());
	}
}
