//! Shared fixtures for integration tests: a bridge pointed at an `httpmock` provider.

#![allow(dead_code)]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use sumsub_bridge::{
	auth::{AppSecret, AppToken},
	config::BridgeConfig,
	flows::SessionBroker,
	http::ReqwestHttpClient,
	provider::ProviderClient,
	reqwest::{Client, redirect::Policy},
	url::Url,
};

pub const APP_TOKEN: &str = "sbx:test-app-token";
pub const APP_SECRET: &str = "sbx-test-shared-secret";
pub const LEVEL: &str = "id-and-liveness";
pub const APPLICANTS_PATH: &str = "/resources/applicants";
pub const ACCESS_TOKENS_PATH: &str = "/resources/accessTokens/sdk";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.redirect(Policy::none())
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn config_with_timeout(server: &MockServer, timeout: Duration) -> BridgeConfig {
	BridgeConfig::builder(
		AppToken::new(APP_TOKEN).expect("App token fixture should be valid."),
		AppSecret::new(APP_SECRET),
	)
	.base_url(Url::parse(&server.url("/")).expect("Mock server URL should parse."))
	.request_timeout(timeout)
	.build()
	.expect("Bridge config should build for the mock provider.")
}

pub fn config_for(server: &MockServer) -> BridgeConfig {
	config_with_timeout(server, Duration::from_secs(5))
}

pub fn provider_client_for(server: &MockServer) -> ProviderClient {
	ProviderClient::with_http_client(&config_for(server), test_reqwest_http_client())
		.expect("Provider client should build.")
}

pub fn broker_with_timeout(server: &MockServer, timeout: Duration) -> SessionBroker {
	SessionBroker::with_http_client(&config_with_timeout(server, timeout), test_reqwest_http_client())
		.expect("Session broker should build.")
}

pub fn broker_for(server: &MockServer) -> SessionBroker {
	broker_with_timeout(server, Duration::from_secs(5))
}
