//! Command handlers.
//!
//! Each handler reads what it needs from the session, makes exactly one
//! remote call, and writes results back only when the server answered `"ok"`.
//! Error reporting is left to the dispatcher.

use pro_protocol::{DEFAULT_CURRENCY, Purchase, Response};
use pro_runtime::Result;
use tracing::{debug, error};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::session::{DeviceRecord, PlanRecord};

/// Fresh key letting the server drop a duplicate submission of one purchase.
pub(crate) fn new_idempotency_key() -> String {
	Uuid::new_v4().to_string()
}

pub(crate) async fn create_user(req: &mut RequestContext<'_>) -> Result<Response> {
	let res = req
		.client
		.user_create(&req.user)
		.await
		.inspect_err(|err| error!(target = "pro", error = %err, "could not create new Pro user"))?;

	if res.is_ok() {
		let user = &res.user;
		debug!(target = "pro", user_id = user.auth.id, referral = %user.referral, "created new user");
		req.session.set_user_id(user.auth.id);
		req.session.set_token(user.auth.token.clone());
		req.session.set_code(user.referral.clone());
	}
	Ok(res)
}

pub(crate) async fn purchase(req: &mut RequestContext<'_>) -> Result<Response> {
	let currency = match req.session.currency() {
		"" => DEFAULT_CURRENCY.to_string(),
		currency => currency.to_lowercase(),
	};
	let order = Purchase {
		idempotency_key: new_idempotency_key(),
		stripe_token: req.session.stripe_token().to_string(),
		stripe_email: req.session.email().to_string(),
		plan: req.session.plan().to_string(),
		currency,
	};

	debug!(target = "pro", plan = %order.plan, currency = %order.currency, "submitting purchase");
	req.client
		.purchase(&req.user, req.session.device_name(), req.session.stripe_api_key(), &order)
		.await
}

pub(crate) async fn request_link_code(req: &mut RequestContext<'_>) -> Result<Response> {
	let res = req
		.client
		.request_link_code(&req.user, req.session.device_name())
		.await
		.inspect_err(|err| error!(target = "pro", error = %err, "could not request link code"))?;

	if res.is_ok() {
		debug!(target = "pro", expire_at = res.user.expire_at, "received link code");
		req.session.set_device_code(res.user.code.clone(), res.user.expire_at);
	}
	Ok(res)
}

pub(crate) async fn redeem_link_code(req: &mut RequestContext<'_>) -> Result<Response> {
	let res = req
		.client
		.redeem_link_code(&req.user, req.session.device_code(), req.session.device_name())
		.await
		.inspect_err(|err| error!(target = "pro", error = %err, "could not redeem link code"))?;

	if !res.is_ok() {
		error!(target = "pro", status = %res.status, error = %res.error, "could not redeem link code");
		return Ok(res);
	}

	req.session.set_token(res.user.auth.token.clone());
	req.session.set_user_id(res.user.auth.id);
	Ok(res)
}

pub(crate) async fn sign_in(req: &mut RequestContext<'_>) -> Result<Response> {
	req.client
		.apply_link_code(&req.user, req.session.verify_code())
		.await
		.inspect_err(|err| error!(target = "pro", error = %err, "could not complete sign-in"))
}

pub(crate) async fn referral(req: &mut RequestContext<'_>) -> Result<Response> {
	req.client.redeem_referral_code(&req.user, req.session.referral()).await
}

pub(crate) async fn cancel(req: &mut RequestContext<'_>) -> Result<Response> {
	req.client.cancel_subscription(&req.user).await
}

/// Publishes the Stripe key and one record per priced plan.
///
/// Plans priced in several currencies surface only one of them (see
/// [`pro_protocol::Plan::primary_price`]).
pub(crate) async fn list_plans(req: &mut RequestContext<'_>) -> Result<Response> {
	let res = req.client.plans(&req.user).await?;
	if !res.is_ok() || res.plans.is_empty() {
		return Ok(res);
	}

	req.session.set_stripe_pub_key(res.pub_key.clone());
	for plan in &res.plans {
		let Some((currency, price)) = plan.primary_price() else {
			continue;
		};
		debug!(
			target = "pro",
			plan = %plan.id,
			currency,
			price,
			best_value = plan.best_value,
			"adding plan"
		);
		req.session.add_plan(PlanRecord {
			id: plan.id.clone(),
			description: plan.description.clone(),
			currency: currency.to_string(),
			best_value: plan.best_value,
			duration_years: plan.duration.years,
			price,
		});
	}
	Ok(res)
}

pub(crate) async fn fetch_user_data(req: &mut RequestContext<'_>) -> Result<Response> {
	let res = req
		.client
		.user_data(&req.user)
		.await
		.inspect_err(|err| error!(target = "pro", error = %err, "error getting Pro user data"))?;

	if !res.is_ok() {
		return Ok(res);
	}

	let user = &res.user;
	debug!(target = "pro", status = %user.user_status, devices = user.devices.len(), "user data");
	for device in &user.devices {
		req.session.add_device(DeviceRecord {
			id: device.id.clone(),
			name: device.name.clone(),
		});
	}
	req.session
		.set_user_data(user.user_status.clone(), user.expiration, user.subscription.clone(), user.email.clone());
	Ok(res)
}
