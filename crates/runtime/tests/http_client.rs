//! HTTP client behavior against a loopback account server.

use std::net::SocketAddr;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use pro_protocol::{Auth, Purchase};
use pro_runtime::{ClientConfig, ClientError, Connector, HttpConnector, ProClient};
use serde_json::{Value, json};
use tokio::net::TcpListener;

fn header(headers: &HeaderMap, name: &str) -> String {
	headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string()
}

async fn user_data(headers: HeaderMap) -> Json<Value> {
	Json(json!({
		"status": "ok",
		"user": {
			"deviceID": header(&headers, "x-pro-device-id"),
			"userId": header(&headers, "x-pro-user-id").parse::<i64>().unwrap_or(-1),
			"token": header(&headers, "x-pro-token"),
			"email": header(&headers, "accept-language"),
			"devices": [{ "id": "d1", "name": "laptop" }, { "id": "d2", "name": "phone" }]
		}
	}))
}

async fn user_create(Json(body): Json<Value>) -> Json<Value> {
	Json(json!({
		"status": "ok",
		"user": { "userId": 42, "token": "T", "referral": body["locale"] }
	}))
}

async fn purchase(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
	if body["stripeToken"] == "tok_declined" {
		return (StatusCode::PAYMENT_REQUIRED, Json(json!({ "status": "error", "error": "card_declined" })));
	}
	(
		StatusCode::OK,
		Json(json!({
			"status": "ok",
			"user": {
				"email": body["stripeEmail"],
				"referral": body["deviceName"],
				"code": body["pubKey"],
				"subscription": body["idempotencyKey"]
			}
		})),
	)
}

async fn broken() -> (StatusCode, &'static str) {
	(StatusCode::BAD_GATEWAY, "<html>upstream down</html>")
}

async fn spawn_server() -> SocketAddr {
	let app = Router::new()
		.route("/api/user-data", get(user_data))
		.route("/api/user-create", post(user_create))
		.route("/api/purchase", post(purchase))
		.route("/api/plans", get(broken));

	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	addr
}

fn client_for(addr: SocketAddr) -> Box<dyn ProClient> {
	let config = ClientConfig::default().with_base_url(format!("http://{addr}/api"));
	HttpConnector::new(config).connect(false).ok().expect("client should build")
}

fn auth() -> Auth {
	Auth {
		device_id: "device-1".into(),
		id: 7,
		token: "secret".into(),
	}
}

#[tokio::test]
async fn identity_and_locale_travel_as_headers() {
	let addr = spawn_server().await;
	let mut client = client_for(addr);
	client.set_locale("de_DE");

	let res = client.user_data(&auth()).await.unwrap();
	assert!(res.is_ok());
	assert_eq!(res.user.auth, auth());
	assert_eq!(res.user.email, "de_DE");
	let names: Vec<_> = res.user.devices.iter().map(|d| d.name.as_str()).collect();
	assert_eq!(names, ["laptop", "phone"]);
}

#[tokio::test]
async fn user_create_sends_locale_and_decodes_auth() {
	let addr = spawn_server().await;
	let mut client = client_for(addr);
	client.set_locale("en_US");

	let res = client.user_create(&Auth::default()).await.unwrap();
	assert_eq!(res.user.auth.id, 42);
	assert_eq!(res.user.auth.token, "T");
	assert_eq!(res.user.referral, "en_US");
}

#[tokio::test]
async fn purchase_body_carries_device_and_key() {
	let addr = spawn_server().await;
	let client = client_for(addr);
	let order = Purchase {
		idempotency_key: "idem-1".into(),
		stripe_token: "tok_visa".into(),
		stripe_email: "user@example.com".into(),
		plan: "1y".into(),
		currency: "usd".into(),
	};

	let res = client.purchase(&auth(), "laptop", "pk_test", &order).await.unwrap();
	assert!(res.is_ok());
	assert_eq!(res.user.email, "user@example.com");
	assert_eq!(res.user.referral, "laptop");
	assert_eq!(res.user.code, "pk_test");
	assert_eq!(res.user.subscription, "idem-1");
}

#[tokio::test]
async fn rejected_reply_keeps_decoded_body() {
	let addr = spawn_server().await;
	let client = client_for(addr);
	let order = Purchase {
		stripe_token: "tok_declined".into(),
		..Default::default()
	};

	let err = client.purchase(&auth(), "laptop", "pk_test", &order).await.unwrap_err();
	match &err {
		ClientError::Rejected { status, response } => {
			assert_eq!(*status, 402);
			assert_eq!(response.error, "card_declined");
		}
		other => panic!("expected rejection, got {other:?}"),
	}
	assert_eq!(err.response().map(|r| r.error.as_str()), Some("card_declined"));
}

#[tokio::test]
async fn non_json_error_reply_is_status_error() {
	let addr = spawn_server().await;
	let client = client_for(addr);

	let err = client.plans(&auth()).await.unwrap_err();
	assert!(matches!(err, ClientError::Status(502)));
	assert!(err.response().is_none());
}

#[tokio::test]
async fn unreachable_server_is_connection_error() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let client = client_for(addr);
	let err = client.cancel_subscription(&auth()).await.unwrap_err();
	assert!(matches!(err, ClientError::Connection(_)), "unexpected error: {err:?}");
}
