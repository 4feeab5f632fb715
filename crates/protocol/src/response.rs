//! Response envelope shared by every server operation.

use serde::{Deserialize, Serialize};

use crate::{Plan, User};

/// Status value the server uses for a successful operation.
pub const STATUS_OK: &str = "ok";

/// Envelope returned by every operation.
///
/// `status` is `"ok"` on success; anything else is a failure described by
/// `error` (which may be empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub error: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_id: Option<String>,
	#[serde(default)]
	pub user: User,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub plans: Vec<Plan>,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub pub_key: String,
}

impl Response {
	/// A bare successful response.
	pub fn ok() -> Self {
		Self {
			status: STATUS_OK.to_string(),
			..Default::default()
		}
	}

	/// A failed response with the given status and error message.
	pub fn failed(status: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			status: status.into(),
			error: error.into(),
			..Default::default()
		}
	}

	pub fn with_user(mut self, user: User) -> Self {
		self.user = user;
		self
	}

	pub fn with_plans(mut self, pub_key: impl Into<String>, plans: Vec<Plan>) -> Self {
		self.pub_key = pub_key.into();
		self.plans = plans;
		self
	}

	/// Returns `true` when the server reported success.
	pub fn is_ok(&self) -> bool {
		self.status == STATUS_OK
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_literal_ok_status_is_success() {
		assert!(Response::ok().is_ok());
		assert!(!Response::failed("error", "card_declined").is_ok());
		assert!(!Response::failed("OK", "").is_ok());
		assert!(!Response::default().is_ok());
	}

	#[test]
	fn decodes_error_body() {
		let res: Response = serde_json::from_str(r#"{"status":"error","error":"card_declined","errorId":"card-declined"}"#).unwrap();
		assert!(!res.is_ok());
		assert_eq!(res.error, "card_declined");
		assert_eq!(res.error_id.as_deref(), Some("card-declined"));
	}

	#[test]
	fn decodes_plans_body() {
		let res: Response = serde_json::from_str(
			r#"{"status":"ok","pubKey":"pk_test","plans":[{"id":"1y","description":"One year","price":{"usd":2400},"bestValue":false,"duration":{"years":1}}]}"#,
		)
		.unwrap();
		assert_eq!(res.pub_key, "pk_test");
		assert_eq!(res.plans.len(), 1);
		assert_eq!(res.plans[0].primary_price(), Some(("usd", 2400)));
	}
}
