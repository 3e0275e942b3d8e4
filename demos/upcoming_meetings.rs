//! Walks every active user and gathers their upcoming meetings, sorted by start time, against a
//! local mock of the REST API.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use zoom_api_client::{
	auth::Credentials,
	client::Client,
	config::{ClientConfig, ClientConfigBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _users = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users").query_param("status", "active");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "users": [{ "id": "ada" }, { "id": "grace" }] }));
		})
		.await;
	let _ada = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users/ada/meetings");
			then.status(200).json_body(json!({ "meetings": [
				{ "topic": "Engine review", "start_time": "2024-05-02T15:00:00Z" },
			] }));
		})
		.await;
	let _grace = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users/grace/meetings");
			then.status(200).json_body(json!({ "meetings": [
				{ "topic": "Compiler sync", "start_time": "2024-05-02T09:00:00Z" },
			] }));
		})
		.await;
	let config = ClientConfig::builder()
		.base_url_str(&server.url("/v2/"))
		.and_then(ClientConfigBuilder::build)?;
	let client = Client::with_config(Credentials::new("demo-key", "demo-secret"), config)?;
	let users = client
		.users()
		.list(&json!({ "status": "active", "page_size": 300, "page_number": 1 }))
		.await?;

	if !users.is_success() {
		println!("Listing users failed: {:?}.", users.into_normalized());

		return Ok(());
	}

	let ids = users
		.get("users")
		.and_then(Value::as_array)
		.into_iter()
		.flatten()
		.filter_map(|user| user.get("id").and_then(Value::as_str).map(ToOwned::to_owned))
		.collect::<Vec<_>>();
	let mut upcoming = Vec::new();

	for id in ids {
		let meetings =
			client.meetings().list(&id, &json!({ "type": "upcoming", "page_size": 30 })).await?;

		if !meetings.is_success() {
			continue;
		}
		if let Some(Value::Array(items)) = meetings.into_body().remove("meetings") {
			upcoming.extend(items);
		}
	}

	upcoming.sort_by_key(|meeting| {
		meeting.get("start_time").and_then(Value::as_str).map(ToOwned::to_owned)
	});

	for meeting in &upcoming {
		println!("{meeting}");
	}

	Ok(())
}
