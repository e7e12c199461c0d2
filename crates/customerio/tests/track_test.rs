// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Track API surface against a wiremock server.

use customerio::{Attributes, CustomerIoError, Identifier, TrackClient};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn attributes(value: serde_json::Value) -> Attributes {
	match value {
		serde_json::Value::Object(map) => map,
		other => panic!("expected object, got {other}"),
	}
}

fn client(server: &MockServer) -> TrackClient {
	TrackClient::builder("site", "key")
		.base_url(server.uri())
		.build()
		.expect("client build")
}

async fn silent_server() -> MockServer {
	let server = MockServer::start().await;
	Mock::given(path_regex(".*"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;
	server
}

#[tokio::test]
async fn identify_puts_attributes() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.and(path("/api/v1/customers/5"))
		.and(basic_auth("site", "key"))
		.and(header("content-type", "application/json"))
		.and(body_json(json!({"email": "five@example.com", "plan": "pro"})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.identify(
			"5",
			&attributes(json!({"email": "five@example.com", "plan": "pro"})),
		)
		.await
		.expect("identify");
}

#[tokio::test]
async fn identify_escapes_customer_id() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.and(path("/api/v1/customers/a%2Fb"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.identify("a/b", &Attributes::new())
		.await
		.expect("identify");
}

#[tokio::test]
async fn track_posts_named_event() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/v1/customers/5/events"))
		.and(body_json(json!({"name": "purchase", "data": {"price": 23.45}})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.track("5", "purchase", &attributes(json!({"price": 23.45})))
		.await
		.expect("track");
}

#[tokio::test]
async fn track_anonymous_omits_empty_anonymous_id() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/v1/events"))
		.and(body_json(json!({"name": "invite", "data": {}})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/api/v1/events"))
		.and(body_json(json!({"name": "invite", "data": {}, "anonymous_id": "anon-1"})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client(&server);
	client
		.track_anonymous("", "invite", &Attributes::new())
		.await
		.expect("track anonymous");
	client
		.track_anonymous("anon-1", "invite", &Attributes::new())
		.await
		.expect("track anonymous with id");
}

#[tokio::test]
async fn delete_sends_delete() {
	let server = MockServer::start().await;
	Mock::given(method("DELETE"))
		.and(path("/api/v1/customers/5"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server).delete("5").await.expect("delete");
}

#[tokio::test]
async fn add_device_wraps_device_object() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.and(path("/api/v1/customers/5/devices"))
		.and(body_json(json!({
			"device": {"id": "tok", "platform": "ios", "last_used": 1700000000}
		})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.add_device(
			"5",
			"tok",
			"ios",
			&attributes(json!({"last_used": 1700000000, "platform": "android"})),
		)
		.await
		.expect("add device");
}

#[tokio::test]
async fn delete_device_targets_device_path() {
	let server = MockServer::start().await;
	Mock::given(method("DELETE"))
		.and(path("/api/v1/customers/5/devices/tok"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.delete_device("5", "tok")
		.await
		.expect("delete device");
}

#[tokio::test]
async fn merge_customers_sends_namespaced_identifiers() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/v1/merge_customers"))
		.and(body_json(json!({
			"primary": {"email": "keep@example.com"},
			"secondary": {"cio_id": "a3000001"}
		})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.merge_customers(
			&Identifier::email("keep@example.com"),
			&Identifier::cio_id("a3000001"),
		)
		.await
		.expect("merge");
}

#[tokio::test]
async fn missing_params_fail_without_request() {
	let server = silent_server().await;
	let client = client(&server);
	let empty = Attributes::new();

	let cases = [
		(client.identify("", &empty).await, "customerID"),
		(client.track("", "event", &empty).await, "customerID"),
		(client.track("5", "", &empty).await, "eventName"),
		(client.track_anonymous("anon", "", &empty).await, "eventName"),
		(client.delete("").await, "customerID"),
		(client.add_device("", "tok", "ios", &empty).await, "customerID"),
		(client.add_device("5", "", "ios", &empty).await, "deviceID"),
		(client.add_device("5", "tok", "", &empty).await, "platform"),
		(client.delete_device("", "tok").await, "customerID"),
		(client.delete_device("5", "").await, "deviceID"),
		(
			client
				.merge_customers(&Identifier::id(""), &Identifier::id("2"))
				.await,
			"primary",
		),
		(
			client
				.merge_customers(&Identifier::id("1"), &Identifier::email(""))
				.await,
			"secondary",
		),
	];

	for (result, expected) in cases {
		match result {
			Err(CustomerIoError::Param { param }) => assert_eq!(param, expected),
			other => panic!("expected param error for {expected}, got {other:?}"),
		}
	}
}

#[tokio::test]
async fn server_error_is_api_error() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.respond_with(ResponseTemplate::new(503).set_body_string("try later"))
		.mount(&server)
		.await;

	let err = client(&server)
		.identify("5", &Attributes::new())
		.await
		.unwrap_err();
	assert_eq!(err.status(), Some(503));
	assert!(err.is_retryable());
	assert!(err.to_string().starts_with("503: "));
	assert!(err.to_string().ends_with(" try later"));
}

/// Serves one 500 response whose body is cut short of its Content-Length.
async fn truncated_error_server() -> String {
	use tokio::io::{AsyncReadExt, AsyncWriteExt};

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("bind");
	let addr = listener.local_addr().expect("local addr");
	tokio::spawn(async move {
		let (mut socket, _) = listener.accept().await.expect("accept");
		let mut buf = [0u8; 4096];
		let _ = socket.read(&mut buf).await;
		let _ = socket
			.write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 64\r\n\r\npartial")
			.await;
		let _ = socket.shutdown().await;
	});
	format!("http://{addr}")
}

#[tokio::test]
async fn unreadable_error_body_keeps_status() {
	let client = TrackClient::builder("site", "key")
		.base_url(truncated_error_server().await)
		.build()
		.expect("client build");

	match client.delete("5").await {
		Err(CustomerIoError::Api { status, url, body }) => {
			assert_eq!(status, 500);
			assert!(url.ends_with("/api/v1/customers/5"));
			assert_eq!(body, "");
		}
		other => panic!("expected API error, got {other:?}"),
	}
}
