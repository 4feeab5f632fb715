use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pro")]
#[command(about = "Pro account client - manage accounts, devices and subscriptions")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
	pub format: OutputFormat,

	/// Session file (defaults to the user config directory)
	#[arg(long, global = true, value_name = "FILE", env = "PRO_SESSION_FILE")]
	pub session: Option<PathBuf>,

	/// Route requests through the configured proxy
	#[arg(long, global = true)]
	pub proxy: bool,

	/// Account server base URL
	#[arg(long, global = true, value_name = "URL", env = "PRO_SERVER_URL")]
	pub server: Option<String>,

	/// Proxy URL used with --proxy
	#[arg(long, global = true, value_name = "URL", env = "PRO_PROXY_URL")]
	pub proxy_url: Option<String>,

	/// Request timeout in milliseconds
	#[arg(long, global = true, value_name = "MS")]
	pub timeout_ms: Option<u64>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run an account command (see `pro commands`)
	Exec {
		/// Command name, e.g. create-user, list-plans, purchase
		command: String,
	},

	/// Unlink a device from the account
	RemoveDevice {
		/// Device identifier as listed by fetch-user-data
		device_id: String,
	},

	/// List registered account commands
	Commands,

	/// Inspect or edit the local session
	Session {
		#[command(subcommand)]
		action: SessionAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum SessionAction {
	/// Show the session (secrets redacted)
	Show,
	/// Set session fields
	Set(SessionSetArgs),
	/// Delete the session file
	Clear,
}

#[derive(Args, Debug, Default)]
pub struct SessionSetArgs {
	#[arg(long)]
	pub device_id: Option<String>,
	#[arg(long)]
	pub device_name: Option<String>,
	#[arg(long)]
	pub locale: Option<String>,
	#[arg(long)]
	pub email: Option<String>,
	/// Plan id to purchase
	#[arg(long)]
	pub plan: Option<String>,
	#[arg(long)]
	pub currency: Option<String>,
	#[arg(long)]
	pub stripe_token: Option<String>,
	#[arg(long)]
	pub stripe_api_key: Option<String>,
	/// Verification code for sign-in
	#[arg(long)]
	pub verify_code: Option<String>,
	/// Referral code to redeem
	#[arg(long)]
	pub referral: Option<String>,
	/// Link code to redeem on this device
	#[arg(long)]
	pub device_code: Option<String>,
}
