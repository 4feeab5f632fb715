//! Scripted in-memory client for testing request orchestration.
//!
//! Replies are queued per [`Operation`]; an operation with nothing queued
//! answers with a bare `"ok"` response. Every call is recorded together with
//! the identity and locale it was made with.
//!
//! # Example
//!
//! ```ignore
//! let connector = FakeConnector::new();
//! connector.reply(Operation::UserCreate, Response::ok().with_user(user));
//!
//! let dispatcher = Dispatcher::new(connector.clone());
//! assert!(dispatcher.dispatch(false, "create-user", &mut session).await);
//! assert_eq!(connector.calls_for(Operation::UserCreate).len(), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use pro_protocol::{Auth, Purchase, Response};
use serde_json::{Value, json};

use crate::client::{Connector, Operation, ProClient};
use crate::error::{ClientError, Result, TransportError};

/// A call observed by a [`FakeConnector`] client.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
	pub operation: Operation,
	pub auth: Auth,
	pub locale: String,
	/// Operation arguments, keyed by their wire names.
	pub args: Value,
}

#[derive(Default)]
struct FakeState {
	replies: HashMap<Operation, VecDeque<Result<Response>>>,
	calls: Vec<RecordedCall>,
	connects: usize,
	reject_proxy: bool,
}

/// Connector handing out scripted clients that share one reply queue.
#[derive(Clone, Default)]
pub struct FakeConnector {
	state: Arc<Mutex<FakeState>>,
}

impl FakeConnector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes `connect(true)` fail the way an unconfigured proxy does.
	pub fn reject_proxy(self) -> Self {
		self.state.lock().reject_proxy = true;
		self
	}

	/// Queues a response for the next call to `operation`.
	pub fn reply(&self, operation: Operation, response: Response) -> &Self {
		self.enqueue(operation, Ok(response))
	}

	/// Queues an error for the next call to `operation`.
	pub fn fail(&self, operation: Operation, error: ClientError) -> &Self {
		self.enqueue(operation, Err(error))
	}

	fn enqueue(&self, operation: Operation, reply: Result<Response>) -> &Self {
		self.state.lock().replies.entry(operation).or_default().push_back(reply);
		self
	}

	/// All calls made so far, in order.
	pub fn calls(&self) -> Vec<RecordedCall> {
		self.state.lock().calls.clone()
	}

	pub fn calls_for(&self, operation: Operation) -> Vec<RecordedCall> {
		self.state.lock().calls.iter().filter(|call| call.operation == operation).cloned().collect()
	}

	/// Number of clients successfully handed out.
	pub fn connect_count(&self) -> usize {
		self.state.lock().connects
	}
}

impl Connector for FakeConnector {
	fn connect(&self, should_proxy: bool) -> std::result::Result<Box<dyn ProClient>, TransportError> {
		let mut state = self.state.lock();
		if should_proxy && state.reject_proxy {
			return Err(TransportError::ProxyNotConfigured);
		}
		state.connects += 1;
		Ok(Box::new(FakeClient {
			state: Arc::clone(&self.state),
			locale: String::new(),
		}))
	}
}

struct FakeClient {
	state: Arc<Mutex<FakeState>>,
	locale: String,
}

impl FakeClient {
	fn answer(&self, operation: Operation, user: &Auth, args: Value) -> Result<Response> {
		let mut state = self.state.lock();
		state.calls.push(RecordedCall {
			operation,
			auth: user.clone(),
			locale: self.locale.clone(),
			args,
		});
		state
			.replies
			.get_mut(&operation)
			.and_then(VecDeque::pop_front)
			.unwrap_or_else(|| Ok(Response::ok()))
	}
}

#[async_trait]
impl ProClient for FakeClient {
	fn set_locale(&mut self, locale: &str) {
		self.locale = locale.to_string();
	}

	async fn user_create(&self, user: &Auth) -> Result<Response> {
		self.answer(Operation::UserCreate, user, json!({}))
	}

	async fn purchase(&self, user: &Auth, device_name: &str, pub_key: &str, purchase: &Purchase) -> Result<Response> {
		let mut args = serde_json::to_value(purchase)?;
		args["deviceName"] = Value::from(device_name);
		args["pubKey"] = Value::from(pub_key);
		self.answer(Operation::Purchase, user, args)
	}

	async fn plans(&self, user: &Auth) -> Result<Response> {
		self.answer(Operation::Plans, user, json!({}))
	}

	async fn request_link_code(&self, user: &Auth, device_name: &str) -> Result<Response> {
		self.answer(Operation::RequestLinkCode, user, json!({ "deviceName": device_name }))
	}

	async fn redeem_link_code(&self, user: &Auth, code: &str, device_name: &str) -> Result<Response> {
		self.answer(Operation::RedeemLinkCode, user, json!({ "code": code, "deviceName": device_name }))
	}

	async fn apply_link_code(&self, user: &Auth, code: &str) -> Result<Response> {
		self.answer(Operation::ApplyLinkCode, user, json!({ "code": code }))
	}

	async fn user_data(&self, user: &Auth) -> Result<Response> {
		self.answer(Operation::UserData, user, json!({}))
	}

	async fn redeem_referral_code(&self, user: &Auth, code: &str) -> Result<Response> {
		self.answer(Operation::RedeemReferralCode, user, json!({ "code": code }))
	}

	async fn cancel_subscription(&self, user: &Auth) -> Result<Response> {
		self.answer(Operation::CancelSubscription, user, json!({}))
	}

	async fn user_link_remove(&self, user: &Auth, device_id: &str) -> Result<Response> {
		self.answer(Operation::RemoveLinkedDevice, user, json!({ "deviceId": device_id }))
	}
}
