//! The session capability consumed by every command.

use serde::{Deserialize, Serialize};

/// A plan offered to the user, with a single currency/price pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
	pub id: String,
	pub description: String,
	pub currency: String,
	pub best_value: bool,
	pub duration_years: i32,
	/// Price in minor units of `currency`.
	pub price: i64,
}

/// A device linked to the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
	pub id: String,
	pub name: String,
}

/// The most recent command failure reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
	pub command: String,
	pub message: String,
}

/// Caller-owned account state read and written by command handlers.
///
/// Setters are last-write-wins. `add_plan` and `add_device` are called once
/// per item, in presentation order. `set_error` is called at most once per
/// dispatch and replaces any earlier error.
pub trait Session: Send {
	fn user_id(&self) -> i64;
	/// Referral code issued to this user.
	fn code(&self) -> &str;
	/// Verification code entered by the user to sign in on this device.
	fn verify_code(&self) -> &str;
	/// Link code issued to this device.
	fn device_code(&self) -> &str;
	fn device_id(&self) -> &str;
	fn device_name(&self) -> &str;
	fn locale(&self) -> &str;
	/// Referral code of another user, to redeem.
	fn referral(&self) -> &str;
	fn token(&self) -> &str;
	/// Selected plan id.
	fn plan(&self) -> &str;
	fn stripe_token(&self) -> &str;
	fn stripe_api_key(&self) -> &str;
	fn email(&self) -> &str;
	fn currency(&self) -> &str;

	fn set_token(&mut self, token: String);
	fn set_user_id(&mut self, user_id: i64);
	fn set_device_code(&mut self, code: String, expires_at: i64);
	fn set_user_data(&mut self, status: String, expiration: i64, subscription: String, email: String);
	fn set_code(&mut self, code: String);
	fn set_error(&mut self, command: &str, message: &str);
	fn set_stripe_pub_key(&mut self, key: String);
	fn add_plan(&mut self, plan: PlanRecord);
	fn add_device(&mut self, device: DeviceRecord);
}

/// Plain in-memory session, serializable for persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemorySession {
	pub user_id: i64,
	pub token: String,
	pub code: String,
	pub verify_code: String,
	pub device_id: String,
	pub device_name: String,
	pub device_code: String,
	pub device_code_expires_at: i64,
	pub locale: String,
	pub referral: String,
	pub plan: String,
	pub currency: String,
	pub email: String,
	pub stripe_token: String,
	pub stripe_api_key: String,
	pub stripe_pub_key: String,
	pub user_status: String,
	pub expiration: i64,
	pub subscription: String,
	pub plans: Vec<PlanRecord>,
	pub devices: Vec<DeviceRecord>,
	pub error: Option<SessionError>,
}

impl MemorySession {
	/// A fresh session for an unregistered device.
	pub fn for_device(device_id: impl Into<String>, device_name: impl Into<String>) -> Self {
		Self {
			device_id: device_id.into(),
			device_name: device_name.into(),
			..Default::default()
		}
	}

	pub fn error(&self) -> Option<&SessionError> {
		self.error.as_ref()
	}

	pub fn clear_error(&mut self) {
		self.error = None;
	}

	pub fn clear_plans(&mut self) {
		self.plans.clear();
		self.stripe_pub_key.clear();
	}

	pub fn clear_devices(&mut self) {
		self.devices.clear();
	}

	/// Returns `true` once the server has issued this device an identity.
	pub fn is_registered(&self) -> bool {
		self.user_id != 0 && !self.token.is_empty()
	}
}

impl Session for MemorySession {
	fn user_id(&self) -> i64 {
		self.user_id
	}

	fn code(&self) -> &str {
		&self.code
	}

	fn verify_code(&self) -> &str {
		&self.verify_code
	}

	fn device_code(&self) -> &str {
		&self.device_code
	}

	fn device_id(&self) -> &str {
		&self.device_id
	}

	fn device_name(&self) -> &str {
		&self.device_name
	}

	fn locale(&self) -> &str {
		&self.locale
	}

	fn referral(&self) -> &str {
		&self.referral
	}

	fn token(&self) -> &str {
		&self.token
	}

	fn plan(&self) -> &str {
		&self.plan
	}

	fn stripe_token(&self) -> &str {
		&self.stripe_token
	}

	fn stripe_api_key(&self) -> &str {
		&self.stripe_api_key
	}

	fn email(&self) -> &str {
		&self.email
	}

	fn currency(&self) -> &str {
		&self.currency
	}

	fn set_token(&mut self, token: String) {
		self.token = token;
	}

	fn set_user_id(&mut self, user_id: i64) {
		self.user_id = user_id;
	}

	fn set_device_code(&mut self, code: String, expires_at: i64) {
		self.device_code = code;
		self.device_code_expires_at = expires_at;
	}

	fn set_user_data(&mut self, status: String, expiration: i64, subscription: String, email: String) {
		self.user_status = status;
		self.expiration = expiration;
		self.subscription = subscription;
		self.email = email;
	}

	fn set_code(&mut self, code: String) {
		self.code = code;
	}

	fn set_error(&mut self, command: &str, message: &str) {
		self.error = Some(SessionError {
			command: command.to_string(),
			message: message.to_string(),
		});
	}

	fn set_stripe_pub_key(&mut self, key: String) {
		self.stripe_pub_key = key;
	}

	fn add_plan(&mut self, plan: PlanRecord) {
		self.plans.push(plan);
	}

	fn add_device(&mut self, device: DeviceRecord) {
		self.devices.push(device);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_error_replaces_previous_error() {
		let mut session = MemorySession::default();
		session.set_error("purchase", "card_declined");
		session.set_error("plans", "unavailable");
		assert_eq!(
			session.error(),
			Some(&SessionError {
				command: "plans".into(),
				message: "unavailable".into(),
			})
		);
	}

	#[test]
	fn appends_preserve_call_order() {
		let mut session = MemorySession::default();
		session.add_device(DeviceRecord { id: "b".into(), name: "second".into() });
		session.add_device(DeviceRecord { id: "a".into(), name: "first".into() });
		let ids: Vec<_> = session.devices.iter().map(|d| d.id.as_str()).collect();
		assert_eq!(ids, ["b", "a"]);
	}

	#[test]
	fn registration_needs_id_and_token() {
		let mut session = MemorySession::for_device("d1", "laptop");
		assert!(!session.is_registered());
		session.set_user_id(42);
		assert!(!session.is_registered());
		session.set_token("T".into());
		assert!(session.is_registered());
	}

	#[test]
	fn clear_plans_drops_pub_key() {
		let mut session = MemorySession::default();
		session.set_stripe_pub_key("pk".into());
		session.add_plan(PlanRecord::default());
		session.clear_plans();
		assert!(session.plans.is_empty());
		assert!(session.stripe_pub_key.is_empty());
	}
}
