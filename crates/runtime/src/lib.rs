//! Transport and remote-client layer for the Pro account service.
//!
//! * [`transport`] builds the (optionally proxied) HTTP client.
//! * [`client`] defines the [`ProClient`] seam the orchestration layer talks
//!   to, plus the [`Connector`] factory that produces one per request.
//! * [`http`] is the production JSON-over-HTTP implementation.
//! * [`fake`] is a scripted in-memory implementation for tests.

pub mod client;
pub mod config;
pub mod error;
pub mod fake;
pub mod http;
pub mod transport;

pub use client::{Connector, Operation, ProClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result, TransportError};
pub use http::{HttpConnector, HttpProClient};
