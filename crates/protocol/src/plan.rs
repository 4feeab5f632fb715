//! Plan catalogue and purchase payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Currency used when the caller has not selected one.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Subscription length of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDuration {
	#[serde(default)]
	pub years: i32,
	#[serde(default)]
	pub months: i32,
	#[serde(default)]
	pub days: i32,
}

/// A purchasable plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
	pub id: String,
	#[serde(default)]
	pub description: String,
	/// Price per lower-case currency code, in minor units.
	#[serde(default)]
	pub price: BTreeMap<String, i64>,
	#[serde(default)]
	pub best_value: bool,
	#[serde(default)]
	pub duration: PlanDuration,
}

impl Plan {
	/// Returns a single currency/price pair from this plan, if it has any.
	///
	/// Only one currency is surfaced per plan; the map is ordered so the
	/// choice is stable (alphabetically first currency code).
	pub fn primary_price(&self) -> Option<(&str, i64)> {
		self.price
			.iter()
			.find(|(currency, _)| !currency.is_empty())
			.map(|(currency, price)| (currency.as_str(), *price))
	}
}

/// Purchase request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
	pub idempotency_key: String,
	pub stripe_token: String,
	pub stripe_email: String,
	pub plan: String,
	pub currency: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn primary_price_is_none_for_empty_map() {
		let plan = Plan {
			id: "1y".into(),
			..Default::default()
		};
		assert_eq!(plan.primary_price(), None);
	}

	#[test]
	fn primary_price_picks_one_entry() {
		let plan: Plan = serde_json::from_str(r#"{"id":"2y","price":{"usd":4800,"eur":4200},"duration":{"years":2}}"#).unwrap();
		assert_eq!(plan.primary_price(), Some(("eur", 4200)));
		assert_eq!(plan.duration.years, 2);
	}

	#[test]
	fn purchase_serializes_camel_case() {
		let purchase = Purchase {
			idempotency_key: "k".into(),
			stripe_token: "tok".into(),
			stripe_email: "a@b.c".into(),
			plan: "1y".into(),
			currency: "usd".into(),
		};
		let value = serde_json::to_value(&purchase).unwrap();
		assert_eq!(value["idempotencyKey"], "k");
		assert_eq!(value["stripeEmail"], "a@b.c");
	}
}
