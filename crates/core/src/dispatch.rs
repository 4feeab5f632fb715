//! Command dispatch and outcome reconciliation.

use std::sync::LazyLock;

use pro_protocol::Response;
use pro_runtime::{ClientError, Connector, HttpConnector};
use tracing::{debug, error};

use crate::context::RequestContext;
use crate::error::{ProError, Result};
use crate::registry::{lookup_command, run_handler};
use crate::session::Session;

/// Command tag used in errors from [`Dispatcher::remove_device`].
pub const REMOVE_DEVICE_COMMAND: &str = "remove-device";

static DEFAULT_DISPATCHER: LazyLock<Dispatcher<HttpConnector>> = LazyLock::new(|| Dispatcher::new(HttpConnector::from_env()));

/// Runs named commands against a session.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<C = HttpConnector> {
	connector: C,
}

impl<C: Connector> Dispatcher<C> {
	pub fn new(connector: C) -> Self {
		Self { connector }
	}

	pub fn connector(&self) -> &C {
		&self.connector
	}

	/// Runs `command` and reports whether it succeeded.
	///
	/// On failure the session error slot holds `(command, message)` whenever
	/// the server produced a response; transport failures and unknown
	/// commands leave the session untouched.
	pub async fn dispatch(&self, should_proxy: bool, command: &str, session: &mut dyn Session) -> bool {
		match self.try_dispatch(should_proxy, command, session).await {
			Ok(()) => true,
			Err(err) => {
				error!(target = "pro", command, error = %err, "error making request to Pro server");
				false
			}
		}
	}

	/// Like [`dispatch`](Self::dispatch), returning the failure itself.
	pub async fn try_dispatch(&self, should_proxy: bool, command: &str, session: &mut dyn Session) -> Result<()> {
		let mut req = RequestContext::new(&self.connector, should_proxy, session)?;
		req.apply_locale();

		debug!(target = "pro", command, "received pro request");

		let Some(id) = lookup_command(command) else {
			return Err(ProError::UnknownCommand(command.to_string()));
		};

		let outcome = run_handler(id, &mut req).await;
		reconcile(command, outcome, req.session)
	}

	/// Unlinks `device_id` from the account. Never writes to the session.
	pub async fn remove_device(&self, should_proxy: bool, device_id: &str, session: &mut dyn Session) -> bool {
		match self.try_remove_device(should_proxy, device_id, session).await {
			Ok(()) => true,
			Err(err) => {
				error!(target = "pro", device_id, error = %err, "error removing device");
				false
			}
		}
	}

	pub async fn try_remove_device(&self, should_proxy: bool, device_id: &str, session: &mut dyn Session) -> Result<()> {
		let req = RequestContext::new(&self.connector, should_proxy, session)?;

		debug!(target = "pro", device_id, "calling user link remove");

		let res = req
			.client
			.user_link_remove(&req.user, device_id)
			.await
			.map_err(|source| ProError::Remote {
				command: REMOVE_DEVICE_COMMAND.to_string(),
				source,
			})?;
		ensure_ok(REMOVE_DEVICE_COMMAND, res)
	}
}

/// Runs `command` with the environment-configured HTTP connector.
pub async fn pro_request(should_proxy: bool, command: &str, session: &mut dyn Session) -> bool {
	DEFAULT_DISPATCHER.dispatch(should_proxy, command, session).await
}

/// Unlinks `device_id` using the environment-configured HTTP connector.
pub async fn remove_device(should_proxy: bool, device_id: &str, session: &mut dyn Session) -> bool {
	DEFAULT_DISPATCHER.remove_device(should_proxy, device_id, session).await
}

/// Success requires both a response and an `"ok"` status. Any failure that
/// came with a response is recorded on the session.
fn reconcile(command: &str, outcome: std::result::Result<Response, ClientError>, session: &mut dyn Session) -> Result<()> {
	match outcome {
		Ok(res) => {
			if !res.is_ok() {
				session.set_error(command, &res.error);
			}
			ensure_ok(command, res)
		}
		Err(source) => {
			if let Some(res) = source.response() {
				session.set_error(command, &res.error);
			}
			Err(ProError::Remote {
				command: command.to_string(),
				source,
			})
		}
	}
}

fn ensure_ok(command: &str, res: Response) -> Result<()> {
	if res.is_ok() {
		return Ok(());
	}
	Err(ProError::Status {
		command: command.to_string(),
		status: res.status,
		message: res.error,
	})
}
