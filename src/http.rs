//! Transport primitives for provider calls.
//!
//! [`ReqwestHttpClient`] is the bridge's only dependency on an HTTP stack. It wraps a
//! [`ReqwestClient`] built without redirect following: a redirected request would be replayed
//! against a path its signature does not cover. [`map_reqwest_error`] classifies transport
//! failures so timeouts surface as their own error kind.

// std
use std::ops::Deref;
// crates.io
use reqwest::redirect::Policy;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::FlowKind,
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// Configure custom clients to disable redirect following.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the default client used against the provider.
	pub fn for_provider() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Maps a reqwest failure raised during `call` into a bridge [`Error`].
///
/// `timeout` is the deadline that was applied to the request, reported back on timeouts.
pub fn map_reqwest_error(call: FlowKind, timeout: StdDuration, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::RequestBuild { source: Box::new(err) }.into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { call, after: timeout }.into();
	}

	TransportError::network(call, err).into()
}
