//! Wire types for the Pro account service.
//!
//! This crate contains the serde-serializable types exchanged with the remote
//! account/subscription server. These types represent the "protocol layer" -
//! the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization and small
//!   status helpers
//! * 1:1 with the server's JSON bodies (camelCase field names)
//! * Lenient on input: every response field defaults when absent
//!
//! The session-facing orchestration is built on top of these types in `pro-rs`.

pub mod plan;
pub mod response;
pub mod user;

pub use plan::*;
pub use response::*;
pub use user::*;
