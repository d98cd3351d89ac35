mod common;

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use sumsub_bridge::{
	error::{Error, TransportError, UpstreamError},
	obs::FlowKind,
};

#[tokio::test]
async fn bootstrap_creates_applicant_then_mints_token() {
	let server = MockServer::start_async().await;
	let broker = broker_for(&server);
	let applicant_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(APPLICANTS_PATH).query_param("levelName", LEVEL);
			then.status(201).header("content-type", "application/json").body("{\"id\":\"A1\"}");
		})
		.await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(ACCESS_TOKENS_PATH)
				.json_body(json!({ "ttlInSecs": 600, "userId": "A1", "levelName": LEVEL }));
			then.status(200).header("content-type", "application/json").body("{\"token\":\"T1\"}");
		})
		.await;
	let grant = broker.bootstrap_session().await.expect("Bootstrap should succeed.");

	applicant_mock.assert_calls_async(1).await;
	token_mock.assert_calls_async(1).await;

	assert_eq!(grant.token.expose(), "T1");
	assert_eq!(grant.user_id.as_ref(), "A1");
	assert_eq!(grant.external_user_id.len(), 15);
	assert!(grant.external_user_id.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn applicant_failure_skips_token_mint() {
	let server = MockServer::start_async().await;
	let broker = broker_for(&server);
	let applicant_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(APPLICANTS_PATH);
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"description\":\"Level not found\"}");
		})
		.await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(ACCESS_TOKENS_PATH);
			then.status(200).header("content-type", "application/json").body("{\"token\":\"T1\"}");
		})
		.await;
	let err = broker.bootstrap_session().await.expect_err("Applicant failure should propagate.");

	applicant_mock.assert_calls_async(1).await;
	token_mock.assert_calls_async(0).await;

	assert!(matches!(
		err,
		Error::Upstream(UpstreamError::Status { call: FlowKind::CreateApplicant, status: 400, .. })
	));
}

#[tokio::test]
async fn token_failure_happens_after_applicant_creation() {
	let server = MockServer::start_async().await;
	let broker = broker_for(&server);
	let applicant_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(APPLICANTS_PATH);
			then.status(201).header("content-type", "application/json").body("{\"id\":\"A1\"}");
		})
		.await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(ACCESS_TOKENS_PATH);
			then.status(500).body("provider exploded");
		})
		.await;
	let err = broker.bootstrap_session().await.expect_err("Token failure should propagate.");

	applicant_mock.assert_calls_async(1).await;
	token_mock.assert_calls_async(1).await;

	match err {
		Error::Upstream(UpstreamError::Status { call, status, body }) => {
			assert_eq!(call, FlowKind::MintAccessToken);
			assert_eq!(status, 500);
			assert_eq!(body, "provider exploded");
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn slow_provider_times_out() {
	let server = MockServer::start_async().await;
	let broker = broker_with_timeout(&server, Duration::from_millis(200));
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(ACCESS_TOKENS_PATH);
			then.status(200).body("{\"token\":\"T1\"}");
		})
		.await;
	let _applicant_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(APPLICANTS_PATH);
			then.status(201).body("{\"id\":\"A1\"}").delay(Duration::from_secs(2));
		})
		.await;
	let err = broker.bootstrap_session().await.expect_err("Slow provider should time out.");

	token_mock.assert_calls_async(0).await;

	assert!(err.is_timeout(), "Unexpected error: {err:?}.");
	assert!(matches!(
		err,
		Error::Transport(TransportError::Timeout { call: FlowKind::CreateApplicant, .. })
	));
}

#[tokio::test]
async fn each_bootstrap_uses_a_new_external_id() {
	let server = MockServer::start_async().await;
	let broker = broker_for(&server);
	let applicant_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(APPLICANTS_PATH);
			then.status(201).body("{\"id\":\"A1\"}");
		})
		.await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(ACCESS_TOKENS_PATH);
			then.status(200).body("{\"token\":\"T1\"}");
		})
		.await;
	let first = broker.bootstrap_session().await.expect("First bootstrap should succeed.");
	let second = broker.bootstrap_session().await.expect("Second bootstrap should succeed.");

	applicant_mock.assert_calls_async(2).await;

	assert_ne!(first.external_user_id, second.external_user_id);
}
