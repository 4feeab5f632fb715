//! Account identity and user payloads.

use serde::{Deserialize, Serialize};

/// Identity presented with every request.
///
/// A zero `id` and empty `token` mean the device has not been registered yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
	#[serde(default, rename = "deviceID")]
	pub device_id: String,
	#[serde(default, rename = "userId")]
	pub id: i64,
	#[serde(default)]
	pub token: String,
}

/// A device linked to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub created: i64,
}

/// User payload returned by account operations.
///
/// Which fields are populated depends on the operation: `user-create` fills
/// `auth` and `referral`, `user-link-request` fills `code` and `expire_at`,
/// `user-data` fills the subscription fields and `devices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	#[serde(flatten)]
	pub auth: Auth,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub referral: String,
	/// Link code issued to this device.
	#[serde(default)]
	pub code: String,
	/// Unix timestamp (seconds) after which `code` is no longer redeemable.
	#[serde(default)]
	pub expire_at: i64,
	#[serde(default)]
	pub user_status: String,
	/// Unix timestamp (seconds) of the subscription end.
	#[serde(default)]
	pub expiration: i64,
	#[serde(default)]
	pub subscription: String,
	#[serde(default)]
	pub devices: Vec<Device>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_auth_fields_are_flattened() {
		let user: User = serde_json::from_str(r#"{"userId":42,"token":"T","deviceID":"d1","referral":"R1"}"#).unwrap();
		assert_eq!(user.auth.id, 42);
		assert_eq!(user.auth.token, "T");
		assert_eq!(user.auth.device_id, "d1");
		assert_eq!(user.referral, "R1");
		assert!(user.devices.is_empty());
	}

	#[test]
	fn user_tolerates_missing_fields() {
		let user: User = serde_json::from_str("{}").unwrap();
		assert_eq!(user, User::default());
	}
}
