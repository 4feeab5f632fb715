//! Client-side orchestration for the Pro account and subscription service.
//!
//! A caller owns a [`Session`] and issues named commands against it:
//!
//! ```ignore
//! let dispatcher = Dispatcher::new(HttpConnector::from_env());
//! if !dispatcher.dispatch(false, "create-user", &mut session).await {
//!     // session.error() now describes the failure, when the server sent one
//! }
//! ```
//!
//! Each dispatch builds a fresh [`RequestContext`], runs exactly one handler
//! from the [`registry`], and reconciles the outcome: handler write-through
//! happens only for `"ok"` responses, failures carrying a server response are
//! recorded on the session, and the caller gets a boolean.

pub mod context;
pub mod dispatch;
pub mod error;
mod handlers;
pub mod registry;
pub mod session;

pub use context::RequestContext;
pub use dispatch::{Dispatcher, REMOVE_DEVICE_COMMAND, pro_request, remove_device};
pub use error::{ProError, Result};
pub use pro_protocol as protocol;
pub use pro_runtime as runtime;
pub use pro_runtime::{ClientConfig, HttpConnector};
pub use registry::{CommandId, command_name, lookup_command};
pub use session::{DeviceRecord, MemorySession, PlanRecord, Session, SessionError};
