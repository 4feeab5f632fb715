//! Command registry.
//!
//! The table is generated at compile time, so it is immutable and shared by
//! every dispatch. Lookups return `None` for names that are not registered.

use crate::handlers;

pro_command_macros::command_catalog! {
	commands: [
		CreateUser => handlers::create_user {
			names: ["create-user", "newuser"],
			summary: "Register this device as a new user",
		},
		Purchase => handlers::purchase {
			names: ["purchase"],
			summary: "Buy the selected plan with the session's Stripe token",
		},
		ListPlans => handlers::list_plans {
			names: ["list-plans", "plans"],
			summary: "Fetch purchasable plans and the Stripe public key",
		},
		SignIn => handlers::sign_in {
			names: ["sign-in", "signin"],
			summary: "Apply a verification code received on another device",
		},
		RedeemLinkCode => handlers::redeem_link_code {
			names: ["redeem-link-code", "redeemcode"],
			summary: "Redeem this device's link code and adopt the account identity",
		},
		RequestLinkCode => handlers::request_link_code {
			names: ["request-link-code", "requestcode"],
			summary: "Request a link code for this device",
		},
		FetchUserData => handlers::fetch_user_data {
			names: ["fetch-user-data", "userdata"],
			summary: "Fetch subscription status and linked devices",
		},
		Referral => handlers::referral {
			names: ["referral"],
			summary: "Redeem another user's referral code",
		},
		Cancel => handlers::cancel {
			names: ["cancel"],
			summary: "Cancel the subscription",
		},
	],
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_command_by_primary_name() {
		assert_eq!(lookup_command("create-user"), Some(CommandId::CreateUser));
		assert_eq!(lookup_command("purchase"), Some(CommandId::Purchase));
		assert_eq!(lookup_command("list-plans"), Some(CommandId::ListPlans));
		assert_eq!(lookup_command("fetch-user-data"), Some(CommandId::FetchUserData));
		assert_eq!(lookup_command("cancel"), Some(CommandId::Cancel));
	}

	#[test]
	fn lookup_command_by_alias() {
		assert_eq!(lookup_command("newuser"), Some(CommandId::CreateUser));
		assert_eq!(lookup_command("plans"), Some(CommandId::ListPlans));
		assert_eq!(lookup_command("signin"), Some(CommandId::SignIn));
		assert_eq!(lookup_command("redeemcode"), Some(CommandId::RedeemLinkCode));
		assert_eq!(lookup_command("requestcode"), Some(CommandId::RequestLinkCode));
		assert_eq!(lookup_command("userdata"), Some(CommandId::FetchUserData));
	}

	#[test]
	fn lookup_command_unknown_returns_none() {
		assert_eq!(lookup_command("bogus-command"), None);
		assert_eq!(lookup_command(""), None);
		assert_eq!(lookup_command("Purchase"), None);
		assert_eq!(lookup_command("list-plan"), None);
	}

	#[test]
	fn every_command_round_trips_through_its_name() {
		assert_eq!(CommandId::ALL.len(), 9);
		for &id in CommandId::ALL {
			assert_eq!(lookup_command(command_name(id)), Some(id));
			for alias in command_aliases(id) {
				assert_eq!(lookup_command(alias), Some(id));
			}
			assert!(!command_summary(id).is_empty());
		}
	}
}
