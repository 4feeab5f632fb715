//! Remote-service client seam.

use std::fmt;

use async_trait::async_trait;
use pro_protocol::{Auth, Purchase, Response};
use reqwest::Method;

use crate::error::{Result, TransportError};

/// Remote operations exposed by the account server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	UserCreate,
	Purchase,
	Plans,
	RequestLinkCode,
	RedeemLinkCode,
	ApplyLinkCode,
	UserData,
	RedeemReferralCode,
	CancelSubscription,
	RemoveLinkedDevice,
}

impl Operation {
	/// Path relative to the configured server URL.
	pub fn path(self) -> &'static str {
		match self {
			Operation::UserCreate => "user-create",
			Operation::Purchase => "purchase",
			Operation::Plans => "plans",
			Operation::RequestLinkCode => "user-link-request",
			Operation::RedeemLinkCode => "user-link-validate",
			Operation::ApplyLinkCode => "user-link-apply",
			Operation::UserData => "user-data",
			Operation::RedeemReferralCode => "referral-attach",
			Operation::CancelSubscription => "subscription-cancel",
			Operation::RemoveLinkedDevice => "user-link-remove",
		}
	}

	pub fn method(self) -> Method {
		match self {
			Operation::Plans | Operation::UserData => Method::GET,
			_ => Method::POST,
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}

/// Client for the account server.
///
/// Every call takes the caller's identity explicitly and performs exactly one
/// request. Implementations never retry.
#[async_trait]
pub trait ProClient: Send + Sync {
	/// Sets the locale sent with subsequent requests.
	fn set_locale(&mut self, locale: &str);

	async fn user_create(&self, user: &Auth) -> Result<Response>;

	async fn purchase(&self, user: &Auth, device_name: &str, pub_key: &str, purchase: &Purchase) -> Result<Response>;

	async fn plans(&self, user: &Auth) -> Result<Response>;

	async fn request_link_code(&self, user: &Auth, device_name: &str) -> Result<Response>;

	/// Redeems a link code issued to this device, signing it into the account.
	async fn redeem_link_code(&self, user: &Auth, code: &str, device_name: &str) -> Result<Response>;

	/// Applies a verification code received on another device.
	async fn apply_link_code(&self, user: &Auth, code: &str) -> Result<Response>;

	async fn user_data(&self, user: &Auth) -> Result<Response>;

	async fn redeem_referral_code(&self, user: &Auth, code: &str) -> Result<Response>;

	async fn cancel_subscription(&self, user: &Auth) -> Result<Response>;

	async fn user_link_remove(&self, user: &Auth, device_id: &str) -> Result<Response>;
}

/// Produces a fresh client for each request context.
pub trait Connector: Send + Sync {
	fn connect(&self, should_proxy: bool) -> std::result::Result<Box<dyn ProClient>, TransportError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_use_get_and_mutations_use_post() {
		assert_eq!(Operation::Plans.method(), Method::GET);
		assert_eq!(Operation::UserData.method(), Method::GET);
		assert_eq!(Operation::Purchase.method(), Method::POST);
		assert_eq!(Operation::RemoveLinkedDevice.method(), Method::POST);
	}

	#[test]
	fn paths_are_relative() {
		assert!(!Operation::UserCreate.path().starts_with('/'));
		assert_eq!(Operation::RedeemLinkCode.to_string(), "user-link-validate");
	}
}
