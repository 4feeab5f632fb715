//! JSON-over-HTTP implementation of [`ProClient`].

use async_trait::async_trait;
use pro_protocol::{Auth, Purchase, Response};
use reqwest::header::ACCEPT_LANGUAGE;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::client::{Connector, Operation, ProClient};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result, TransportError};
use crate::transport::build_http_client;

pub const DEVICE_ID_HEADER: &str = "X-Pro-Device-Id";
pub const USER_ID_HEADER: &str = "X-Pro-User-Id";
pub const TOKEN_HEADER: &str = "X-Pro-Token";

/// Account server client over a `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpProClient {
	http: reqwest::Client,
	base_url: Url,
	locale: String,
}

impl HttpProClient {
	pub fn new(http: reqwest::Client, base_url: Url) -> Self {
		Self {
			http,
			base_url,
			locale: String::new(),
		}
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	async fn call(&self, operation: Operation, user: &Auth, body: Option<Value>) -> Result<Response> {
		let url = self.base_url.join(operation.path())?;
		debug!(target = "pro", %operation, %url, "sending request");

		let mut request = self
			.http
			.request(operation.method(), url)
			.header(DEVICE_ID_HEADER, user.device_id.as_str())
			.header(USER_ID_HEADER, user.id.to_string())
			.header(TOKEN_HEADER, user.token.as_str());
		if !self.locale.is_empty() {
			request = request.header(ACCEPT_LANGUAGE, self.locale.as_str());
		}
		if let Some(body) = body {
			request = request.json(&body);
		}

		let reply = request.send().await?;
		let status = reply.status();
		let bytes = reply.bytes().await?;

		if status.is_success() {
			return Ok(serde_json::from_slice(&bytes)?);
		}

		match serde_json::from_slice::<Response>(&bytes) {
			Ok(response) => Err(ClientError::Rejected {
				status: status.as_u16(),
				response: Box::new(response),
			}),
			Err(_) => Err(ClientError::Status(status.as_u16())),
		}
	}
}

#[async_trait]
impl ProClient for HttpProClient {
	fn set_locale(&mut self, locale: &str) {
		self.locale = locale.to_string();
	}

	async fn user_create(&self, user: &Auth) -> Result<Response> {
		self.call(Operation::UserCreate, user, Some(json!({ "locale": self.locale }))).await
	}

	async fn purchase(&self, user: &Auth, device_name: &str, pub_key: &str, purchase: &Purchase) -> Result<Response> {
		let mut body = serde_json::to_value(purchase)?;
		if let Value::Object(fields) = &mut body {
			fields.insert("deviceName".into(), Value::from(device_name));
			fields.insert("pubKey".into(), Value::from(pub_key));
		}
		self.call(Operation::Purchase, user, Some(body)).await
	}

	async fn plans(&self, user: &Auth) -> Result<Response> {
		self.call(Operation::Plans, user, None).await
	}

	async fn request_link_code(&self, user: &Auth, device_name: &str) -> Result<Response> {
		self.call(Operation::RequestLinkCode, user, Some(json!({ "deviceName": device_name }))).await
	}

	async fn redeem_link_code(&self, user: &Auth, code: &str, device_name: &str) -> Result<Response> {
		self.call(Operation::RedeemLinkCode, user, Some(json!({ "code": code, "deviceName": device_name })))
			.await
	}

	async fn apply_link_code(&self, user: &Auth, code: &str) -> Result<Response> {
		self.call(Operation::ApplyLinkCode, user, Some(json!({ "code": code }))).await
	}

	async fn user_data(&self, user: &Auth) -> Result<Response> {
		self.call(Operation::UserData, user, None).await
	}

	async fn redeem_referral_code(&self, user: &Auth, code: &str) -> Result<Response> {
		self.call(Operation::RedeemReferralCode, user, Some(json!({ "code": code }))).await
	}

	async fn cancel_subscription(&self, user: &Auth) -> Result<Response> {
		self.call(Operation::CancelSubscription, user, None).await
	}

	async fn user_link_remove(&self, user: &Auth, device_id: &str) -> Result<Response> {
		self.call(Operation::RemoveLinkedDevice, user, Some(json!({ "deviceId": device_id }))).await
	}
}

/// Connector producing [`HttpProClient`]s from a [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
	config: ClientConfig,
}

impl HttpConnector {
	pub fn new(config: ClientConfig) -> Self {
		Self { config }
	}

	pub fn from_env() -> Self {
		Self::new(ClientConfig::from_env())
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Parses the configured server URL, making sure it ends with `/` so
	/// operation paths join beneath it.
	fn base_url(&self) -> std::result::Result<Url, TransportError> {
		let raw = &self.config.base_url;
		let normalized = if raw.ends_with('/') { raw.clone() } else { format!("{raw}/") };
		Url::parse(&normalized).map_err(|source| TransportError::InvalidServerUrl { url: raw.clone(), source })
	}
}

impl Connector for HttpConnector {
	fn connect(&self, should_proxy: bool) -> std::result::Result<Box<dyn ProClient>, TransportError> {
		let base_url = self.base_url()?;
		let http = build_http_client(&self.config, should_proxy)?;
		Ok(Box::new(HttpProClient::new(http, base_url)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_gains_trailing_slash() {
		let connector = HttpConnector::new(ClientConfig::default().with_base_url("https://pro.test/api"));
		let base = connector.base_url().unwrap();
		assert_eq!(base.join(Operation::Plans.path()).unwrap().as_str(), "https://pro.test/api/plans");
	}

	#[test]
	fn invalid_server_url_is_transport_error() {
		let connector = HttpConnector::new(ClientConfig::default().with_base_url("not a url"));
		let err = connector.connect(false).err().unwrap();
		assert!(matches!(err, TransportError::InvalidServerUrl { .. }));
	}

	#[test]
	fn proxy_flag_without_proxy_is_transport_error() {
		let err = HttpConnector::default().connect(true).err().unwrap();
		assert!(matches!(err, TransportError::ProxyNotConfigured));
	}
}
