//! Per-dispatch request context.

use pro_protocol::Auth;
use pro_runtime::{Connector, ProClient, TransportError};
use tracing::error;

use crate::session::Session;

/// A client handle plus the identity snapshot it sends, for one dispatch.
///
/// The identity is captured from the session when the context is built and is
/// never re-read, so session writes made by a handler do not affect the
/// request already in flight.
pub struct RequestContext<'s> {
	pub(crate) client: Box<dyn ProClient>,
	pub(crate) user: Auth,
	pub(crate) session: &'s mut dyn Session,
}

impl<'s> RequestContext<'s> {
	/// Connects a fresh client and snapshots the session identity.
	///
	/// Nothing is written to the session, including on failure.
	pub fn new(connector: &dyn Connector, should_proxy: bool, session: &'s mut dyn Session) -> Result<Self, TransportError> {
		let client = connector.connect(should_proxy).inspect_err(|err| {
			error!(target = "pro", error = %err, should_proxy, "could not create HTTP client");
		})?;

		let user = Auth {
			device_id: session.device_id().to_string(),
			id: session.user_id(),
			token: session.token().to_string(),
		};

		Ok(Self { client, user, session })
	}

	/// Identity sent with every request from this context.
	pub fn user(&self) -> &Auth {
		&self.user
	}

	pub fn session(&self) -> &dyn Session {
		&*self.session
	}

	/// Applies the session locale to the client.
	pub fn apply_locale(&mut self) {
		self.client.set_locale(self.session.locale());
	}
}
