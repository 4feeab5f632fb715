//! Account commands routed through the dispatcher.

use pro::registry::{CommandId, command_aliases, command_summary};
use pro::runtime::Connector;
use pro::{Dispatcher, MemorySession, REMOVE_DEVICE_COMMAND, command_name, lookup_command};
use serde_json::{Value, json};
use tracing::info;

use crate::error::{CliError, Result};
use crate::output::{CommandInfo, CommandResult, IdentityData, LinkCodeData, OutputFormat, PlansData, ResultBuilder, UserData, print_result};
use crate::session_store::SessionStore;

/// Runs a registered command against the stored session and saves it.
///
/// The session's error slot is cleared first, and list results the command
/// is about to repopulate are emptied, so the saved file reflects this run.
pub async fn run_command<C: Connector>(
	dispatcher: &Dispatcher<C>,
	should_proxy: bool,
	command: &str,
	store: &mut SessionStore,
	format: OutputFormat,
) -> Result<()> {
	info!(target = "pro", command, proxy = should_proxy, session = %store.path().display(), "running command");

	let id = lookup_command(command);
	store.session.clear_error();
	match id {
		Some(CommandId::ListPlans) => store.session.clear_plans(),
		Some(CommandId::FetchUserData) => store.session.clear_devices(),
		_ => {}
	}

	let outcome = dispatcher.try_dispatch(should_proxy, command, &mut store.session).await;
	store.save()?;

	let label = id.map(command_name).unwrap_or(command);
	match outcome {
		Ok(()) => {
			let data = id.map(|id| command_data(id, &store.session)).unwrap_or(Value::Null);
			print_result(&ResultBuilder::new(label).data(data).build(), format);
			Ok(())
		}
		Err(err) => {
			let err = CliError::from(err);
			// Prefer the server's own message when one was recorded.
			let message = store
				.session
				.error()
				.filter(|e| !e.message.is_empty())
				.map(|e| e.message.clone())
				.unwrap_or_else(|| err.to_string());
			let result: CommandResult<Value> = ResultBuilder::new(label).error(err.code(), message).build();
			print_result(&result, format);
			Err(err)
		}
	}
}

pub async fn remove_device<C: Connector>(
	dispatcher: &Dispatcher<C>,
	should_proxy: bool,
	device_id: &str,
	store: &mut SessionStore,
	format: OutputFormat,
) -> Result<()> {
	info!(target = "pro", device_id, proxy = should_proxy, "removing device");

	match dispatcher.try_remove_device(should_proxy, device_id, &mut store.session).await {
		Ok(()) => {
			let result = ResultBuilder::new(REMOVE_DEVICE_COMMAND).data(json!({ "deviceId": device_id })).build();
			print_result(&result, format);
			Ok(())
		}
		Err(err) => {
			let err = CliError::from(err);
			let result: CommandResult<Value> = ResultBuilder::new(REMOVE_DEVICE_COMMAND).error(err.code(), err.to_string()).build();
			print_result(&result, format);
			Err(err)
		}
	}
}

pub fn list_commands(format: OutputFormat) {
	let commands: Vec<CommandInfo> = CommandId::ALL
		.iter()
		.map(|&id| CommandInfo {
			name: command_name(id),
			aliases: command_aliases(id),
			summary: command_summary(id),
		})
		.collect();
	print_result(&ResultBuilder::new("commands").data(commands).build(), format);
}

fn command_data(id: CommandId, session: &MemorySession) -> Value {
	let data = match id {
		CommandId::CreateUser | CommandId::RedeemLinkCode => serde_json::to_value(IdentityData {
			user_id: session.user_id,
			referral_code: session.code.clone(),
		}),
		CommandId::RequestLinkCode => serde_json::to_value(LinkCodeData {
			code: session.device_code.clone(),
			expires_at: session.device_code_expires_at,
		}),
		CommandId::ListPlans => serde_json::to_value(PlansData {
			stripe_pub_key: session.stripe_pub_key.clone(),
			plans: session.plans.clone(),
		}),
		CommandId::FetchUserData => serde_json::to_value(UserData {
			user_status: session.user_status.clone(),
			expiration: session.expiration,
			subscription: session.subscription.clone(),
			email: session.email.clone(),
			devices: session.devices.clone(),
		}),
		CommandId::Purchase | CommandId::SignIn | CommandId::Referral | CommandId::Cancel => return json!({}),
	};
	data.unwrap_or(Value::Null)
}
