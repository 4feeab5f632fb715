//! Subcommand implementations.

mod exec;
mod session;

use std::time::Duration;

use pro::{ClientConfig, Dispatcher, HttpConnector};

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::session_store::SessionStore;

pub async fn dispatch(cli: Cli) -> Result<()> {
	let format = cli.format;
	match cli.command {
		Commands::Exec { ref command } => {
			let dispatcher = Dispatcher::new(HttpConnector::new(client_config(&cli)));
			let mut store = SessionStore::open(cli.session.clone())?;
			exec::run_command(&dispatcher, cli.proxy, command, &mut store, format).await
		}
		Commands::RemoveDevice { ref device_id } => {
			let dispatcher = Dispatcher::new(HttpConnector::new(client_config(&cli)));
			let mut store = SessionStore::open(cli.session.clone())?;
			exec::remove_device(&dispatcher, cli.proxy, device_id, &mut store, format).await
		}
		Commands::Commands => {
			exec::list_commands(format);
			Ok(())
		}
		Commands::Session { action } => {
			let mut store = SessionStore::open(cli.session)?;
			session::run(action, &mut store, format)
		}
	}
}

/// Environment configuration overridden by command-line flags.
fn client_config(cli: &Cli) -> ClientConfig {
	let mut config = ClientConfig::from_env();
	if let Some(server) = &cli.server {
		config = config.with_base_url(server.clone());
	}
	if cli.proxy_url.is_some() {
		config = config.with_proxy_url(cli.proxy_url.clone());
	}
	if let Some(ms) = cli.timeout_ms {
		config = config.with_timeout(Duration::from_millis(ms));
	}
	config
}
