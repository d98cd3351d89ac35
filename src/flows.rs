//! High-level flow orchestrators built on the provider client.

mod bootstrap;

pub use bootstrap::*;

// self
use crate::{
	_prelude::*,
	auth::LevelName,
	config::BridgeConfig,
	error::ConfigError,
	http::ReqwestHttpClient,
	provider::ProviderClient,
};

/// Fixed parameters applied to every bootstrap.
#[derive(Clone, Debug)]
pub struct BootstrapSettings {
	/// Verification level for the applicant and the token.
	pub level_name: LevelName,
	/// Requested token lifetime.
	pub token_ttl_secs: u32,
	/// Length of generated external user identifiers.
	pub external_id_len: usize,
}
impl From<&BridgeConfig> for BootstrapSettings {
	fn from(config: &BridgeConfig) -> Self {
		Self {
			level_name: config.level_name.clone(),
			token_ttl_secs: config.token_ttl_secs,
			external_id_len: config.external_id_len,
		}
	}
}

/// Coordinates session bootstraps against a single provider.
///
/// The broker is immutable once built; concurrent bootstraps share it through [`Arc`] and
/// never observe each other's identifiers, timestamps, or signatures.
#[derive(Clone, Debug)]
pub struct SessionBroker {
	/// Signed provider client used for every outbound call.
	pub client: Arc<ProviderClient>,
	/// Level, TTL, and id length applied to every bootstrap.
	pub settings: BootstrapSettings,
}
impl SessionBroker {
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		config: &BridgeConfig,
		http_client: ReqwestHttpClient,
	) -> Result<Self, ConfigError> {
		let client = ProviderClient::with_http_client(config, http_client)?;

		Ok(Self { client: Arc::new(client), settings: config.into() })
	}

	/// Creates a broker with the default provider transport.
	pub fn new(config: &BridgeConfig) -> Result<Self, ConfigError> {
		Self::with_http_client(config, ReqwestHttpClient::for_provider()?)
	}
}
