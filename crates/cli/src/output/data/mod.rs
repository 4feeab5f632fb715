use pro::{DeviceRecord, MemorySession, PlanRecord, SessionError};
use serde::Serialize;

/// Result data for `list-plans`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansData {
	pub stripe_pub_key: String,
	pub plans: Vec<PlanRecord>,
}

/// Result data for `fetch-user-data`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
	pub user_status: String,
	pub expiration: i64,
	pub subscription: String,
	pub email: String,
	pub devices: Vec<DeviceRecord>,
}

/// Result data for commands that change the account identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityData {
	pub user_id: i64,
	#[serde(skip_serializing_if = "String::is_empty")]
	pub referral_code: String,
}

/// Result data for `request-link-code`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCodeData {
	pub code: String,
	pub expires_at: i64,
}

/// Redacted view of the persisted session for `session show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
	pub user_id: i64,
	pub registered: bool,
	pub device_id: String,
	pub device_name: String,
	pub locale: String,
	pub email: String,
	pub plan: String,
	pub currency: String,
	pub referral_code: String,
	pub user_status: String,
	pub plans: usize,
	pub devices: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_error: Option<SessionError>,
}

impl From<&MemorySession> for SessionView {
	fn from(session: &MemorySession) -> Self {
		Self {
			user_id: session.user_id,
			registered: session.is_registered(),
			device_id: session.device_id.clone(),
			device_name: session.device_name.clone(),
			locale: session.locale.clone(),
			email: session.email.clone(),
			plan: session.plan.clone(),
			currency: session.currency.clone(),
			referral_code: session.code.clone(),
			user_status: session.user_status.clone(),
			plans: session.plans.len(),
			devices: session.devices.len(),
			last_error: session.error.clone(),
		}
	}
}

/// Registry entry for `commands`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
	pub name: &'static str,
	pub aliases: &'static [&'static str],
	pub summary: &'static str,
}
