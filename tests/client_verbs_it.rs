// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
use time::{OffsetDateTime, macros::datetime};
// self
use zoom_api_client::{
	auth::{self, Credentials},
	client::{ApiResponse, Client, Fields},
	config::{ClientConfig, ClientConfigBuilder},
	error::{ConfigError, DecodeError, Error, SigningError, TransientError, TransportError},
	ext::ManualClock,
};

const API_KEY: &str = "verbs-key";
const API_SECRET: &str = "verbs-secret";
const NOW: OffsetDateTime = datetime!(2024-05-01 09:30:00 UTC);

fn build_client(server: &MockServer, credentials: Credentials) -> Client {
	let config = ClientConfig::builder()
		.base_url_str(&server.url("/v2/"))
		.and_then(ClientConfigBuilder::build)
		.expect("Mock server base URL should produce a valid config.");

	Client::with_config(credentials, config)
		.expect("Client should build for the mock server.")
		.with_clock(Arc::new(ManualClock::new(NOW)))
}

fn expected_bearer() -> String {
	let token = auth::sign(&Credentials::new(API_KEY, API_SECRET), NOW)
		.expect("Reference token should sign.");

	format!("Bearer {token}")
}

fn fields(value: Value) -> Fields {
	match value {
		Value::Object(map) => map,
		other => panic!("Expected a JSON object, got {other}."),
	}
}

#[tokio::test]
async fn get_sends_query_and_signed_headers() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/users/list")
				.query_param("status", "active")
				.query_param("page_size", "300")
				.header("authorization", expected_bearer())
				.header("content-type", "application/json")
				.header("accept", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "users": [{ "id": "u1" }, { "id": "u2" }] }));
		})
		.await;
	let response = client
		.get("users/list", &json!({ "status": "active", "page_size": 300 }))
		.await
		.expect("GET should succeed.");

	mock.assert_async().await;

	assert!(response.is_success());
	assert_eq!(response.status(), 200);
	assert_eq!(
		Value::Object(response.into_normalized()),
		json!({ "users": [{ "id": "u1" }, { "id": "u2" }], "code": 200 })
	);
}

#[tokio::test]
async fn post_client_error_is_returned_as_data() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/users")
				.json_body(json!({ "action": "create", "user_info": { "email": "a@b.c" } }));
			then.status(400)
				.header("content-type", "application/json")
				.json_body(json!({ "code": 300, "message": "Invalid parameter" }));
		})
		.await;
	let response = client
		.post("users", &json!({ "action": "create", "user_info": { "email": "a@b.c" } }))
		.await
		.expect("4xx responses must not be raised.");

	mock.assert_async().await;

	assert_eq!(response.status(), 400);
	assert!(matches!(response, ApiResponse::ClientError { retry_after: None, .. }));
	assert_eq!(response.get("message"), Some(&json!("Invalid parameter")));
	assert_eq!(
		Value::Object(response.into_normalized()),
		json!({ "code": 300, "message": "Invalid parameter" })
	);
}

#[tokio::test]
async fn put_and_patch_send_json_bodies() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let put = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/v2/users/u1/status")
				.json_body(json!({ "action": "activate" }));
			then.status(204);
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/v2/meetings/42").json_body(json!({ "topic": "Retro" }));
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let put_response = client
		.put("/users/u1/status", &json!({ "action": "activate" }))
		.await
		.expect("PUT should succeed.");
	let patch_response = client
		.patch("meetings/42", &json!({ "topic": "Retro" }))
		.await
		.expect("PATCH should succeed.");

	put.assert_async().await;
	patch.assert_async().await;

	assert_eq!(put_response, ApiResponse::Success { status: 204, body: Fields::new() });
	assert_eq!(Value::Object(patch_response.into_normalized()), json!({ "code": 200 }));
}

#[tokio::test]
async fn delete_defaults_to_empty_object_body() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v2/meetings/42").json_body(json!({}));
			then.status(204);
		})
		.await;
	let response =
		client.delete("meetings/42", &Fields::new()).await.expect("DELETE should succeed.");

	mock.assert_async().await;

	assert_eq!(Value::Object(response.into_normalized()), json!({ "code": 204 }));
}

#[tokio::test]
async fn rate_limited_response_carries_retry_after() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users");
			then.status(429)
				.header("content-type", "application/json")
				.header("retry-after", "2")
				.json_body(json!({ "code": 429, "message": "Too many requests" }));
		})
		.await;
	let response = client.get("users", &Fields::new()).await.expect("429 is returned as data.");

	assert_eq!(
		response,
		ApiResponse::ClientError {
			status: 429,
			body: fields(json!({ "code": 429, "message": "Too many requests" })),
			retry_after: Some(time::Duration::seconds(2)),
		}
	);
}

#[tokio::test]
async fn server_error_propagates() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users");
			then.status(503).body("upstream unavailable");
		})
		.await;
	let err = client.get("users", &Fields::new()).await.expect_err("5xx must be raised.");

	assert!(matches!(
		err,
		Error::Transient(TransientError::Server { status: 503, ref message, .. })
			if message == "upstream unavailable"
	));
}

#[tokio::test]
async fn undecodable_body_propagates() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users");
			then.status(200).body("<html>not json</html>");
		})
		.await;
	let err = client.get("users", &Fields::new()).await.expect_err("Bad JSON must be raised.");

	assert!(matches!(err, Error::Decode(DecodeError::ResponseParse { status: 200, .. })));
}

#[tokio::test]
async fn empty_secret_fails_before_any_request() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, ""));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users");
			then.status(200).body("{}");
		})
		.await;
	let err = client.get("users", &Fields::new()).await.expect_err("Signing must fail.");

	assert!(matches!(err, Error::Signing(SigningError::EmptySecret)));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn connection_failure_propagates() {
	let config = ClientConfig::builder()
		.base_url_str("http://127.0.0.1:9/v2/")
		.and_then(ClientConfigBuilder::build)
		.expect("Loopback config should build.");
	let client = Client::with_config(Credentials::new(API_KEY, API_SECRET), config)
		.expect("Client should build.");
	let err = client.get("users", &Fields::new()).await.expect_err("Nothing listens on port 9.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}

#[tokio::test]
async fn invalid_path_is_a_config_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let err = client.get("http://[::1", &Fields::new()).await.expect_err("Path must not parse.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidPath { .. })));
	assert_eq!(client.throttle().snapshot().await.count, 0);
}

#[tokio::test]
async fn unencodable_query_is_a_config_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users");
			then.status(200).body("{}");
		})
		.await;
	let err = client
		.get("users", &json!({ "ids": [1, 2] }))
		.await
		.expect_err("Nested query values cannot be form-encoded.");

	assert!(matches!(err, Error::Config(ConfigError::QueryEncode { .. })));
	assert_eq!(client.throttle().snapshot().await.count, 0);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn trailing_garbage_body_propagates() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Credentials::new(API_KEY, API_SECRET));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users");
			then.status(200).body("{\"users\": []} <html>oops</html>");
		})
		.await;
	let err = client.get("users", &Fields::new()).await.expect_err("Trailing data must be raised.");

	assert!(matches!(err, Error::Decode(DecodeError::TrailingData { status: 200, .. })));
}
