//! Immutable bridge configuration, assembled once at startup.
//!
//! [`BridgeConfig::from_env`] reads the process environment (after loading `.env` when present)
//! and refuses to produce a value without both credentials, so a process can never reach the
//! point of binding a listener while unauthenticated. Everything downstream receives the config
//! explicitly; nothing consults the environment afterwards.

// std
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	auth::{AppSecret, AppToken, DEFAULT_EXTERNAL_ID_LEN, LevelName},
	error::ConfigError,
};

/// Environment variable holding the application token.
pub const ENV_APP_TOKEN: &str = "SUMSUB_APP_TOKEN";
/// Environment variable holding the shared secret.
pub const ENV_APP_SECRET: &str = "SUMSUB_APP_SECRET";
/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the listen address.
pub const ENV_HOST: &str = "HOST";
/// Environment variable overriding the provider base URL.
pub const ENV_BASE_URL: &str = "SUMSUB_BASE_URL";
/// Environment variable overriding the verification level.
pub const ENV_LEVEL_NAME: &str = "SUMSUB_LEVEL_NAME";
/// Environment variable overriding the access-token TTL.
pub const ENV_TOKEN_TTL_SECS: &str = "SUMSUB_TOKEN_TTL_SECS";
/// Environment variable overriding the outbound request timeout.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SUMSUB_REQUEST_TIMEOUT_SECS";
/// Environment variable overriding the generated external id length.
pub const ENV_EXTERNAL_ID_LEN: &str = "SUMSUB_EXTERNAL_ID_LEN";

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.sumsub.com";
/// Verification level requested when none is configured.
pub const DEFAULT_LEVEL_NAME: &str = "id-and-liveness";
/// Access-token lifetime requested when none is configured.
pub const DEFAULT_TOKEN_TTL_SECS: u32 = 600;
/// Outbound call deadline applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);
/// Listen port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

const MAX_EXTERNAL_ID_LEN: usize = 64;

/// Application token + shared secret pair.
#[derive(Clone, Debug)]
pub struct Credentials {
	/// Value sent in `X-App-Token`.
	pub app_token: AppToken,
	/// Key for request signatures.
	pub app_secret: AppSecret,
}

/// Fully validated bridge configuration.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
	/// Provider credentials.
	pub credentials: Credentials,
	/// Provider API origin; request paths are appended verbatim.
	pub base_url: Url,
	/// Verification level used for applicants and tokens.
	pub level_name: LevelName,
	/// Lifetime requested for minted access tokens.
	pub token_ttl_secs: u32,
	/// Deadline for each outbound provider call.
	pub request_timeout: StdDuration,
	/// Length of generated external user identifiers.
	pub external_id_len: usize,
	/// Address the HTTP server binds to.
	pub listen_addr: SocketAddr,
}
impl BridgeConfig {
	/// Creates a new builder for the provided credentials.
	pub fn builder(app_token: AppToken, app_secret: AppSecret) -> BridgeConfigBuilder {
		BridgeConfigBuilder::new(Credentials { app_token, app_secret })
	}

	/// Loads `.env` (if present) and reads the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		let _ = dotenvy::dotenv();

		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds the configuration from an arbitrary variable lookup.
	///
	/// Empty values are treated as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
		let app_token = get(ENV_APP_TOKEN).ok_or(ConfigError::MissingVar { name: ENV_APP_TOKEN })?;
		let app_secret =
			get(ENV_APP_SECRET).ok_or(ConfigError::MissingVar { name: ENV_APP_SECRET })?;
		let app_token =
			AppToken::new(app_token).map_err(|e| ConfigError::invalid_var(ENV_APP_TOKEN, e))?;
		let mut builder = Self::builder(app_token, AppSecret::new(app_secret));

		if let Some(raw) = get(ENV_BASE_URL) {
			let url = Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

			builder = builder.base_url(url);
		}
		if let Some(raw) = get(ENV_LEVEL_NAME) {
			let level =
				LevelName::new(raw).map_err(|e| ConfigError::invalid_var(ENV_LEVEL_NAME, e))?;

			builder = builder.level_name(level);
		}
		if let Some(secs) = parse_var::<u32>(ENV_TOKEN_TTL_SECS, get(ENV_TOKEN_TTL_SECS))? {
			builder = builder.token_ttl_secs(secs);
		}
		if let Some(secs) =
			parse_var::<u64>(ENV_REQUEST_TIMEOUT_SECS, get(ENV_REQUEST_TIMEOUT_SECS))?
		{
			builder = builder.request_timeout(StdDuration::from_secs(secs));
		}
		if let Some(len) = parse_var::<usize>(ENV_EXTERNAL_ID_LEN, get(ENV_EXTERNAL_ID_LEN))? {
			builder = builder.external_id_len(len);
		}

		let host = parse_var::<IpAddr>(ENV_HOST, get(ENV_HOST))?
			.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
		let port = parse_var::<u16>(ENV_PORT, get(ENV_PORT))?.unwrap_or(DEFAULT_PORT);

		builder.listen_addr(SocketAddr::new(host, port)).build()
	}
}

/// Builder for [`BridgeConfig`] values.
#[derive(Debug)]
pub struct BridgeConfigBuilder {
	credentials: Credentials,
	base_url: Option<Url>,
	level_name: Option<LevelName>,
	token_ttl_secs: u32,
	request_timeout: StdDuration,
	external_id_len: usize,
	listen_addr: SocketAddr,
}
impl BridgeConfigBuilder {
	fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			base_url: None,
			level_name: None,
			token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			external_id_len: DEFAULT_EXTERNAL_ID_LEN,
			listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
		}
	}

	/// Overrides the provider origin.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the verification level.
	pub fn level_name(mut self, level: LevelName) -> Self {
		self.level_name = Some(level);

		self
	}

	/// Overrides the access-token TTL.
	pub fn token_ttl_secs(mut self, secs: u32) -> Self {
		self.token_ttl_secs = secs;

		self
	}

	/// Overrides the outbound call deadline.
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Overrides the generated external id length.
	pub fn external_id_len(mut self, len: usize) -> Self {
		self.external_id_len = len;

		self
	}

	/// Overrides the server listen address.
	pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
		self.listen_addr = addr;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<BridgeConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};
		let level_name = match self.level_name {
			Some(level) => level,
			None => LevelName::new(DEFAULT_LEVEL_NAME)
				.map_err(|e| ConfigError::invalid_var(ENV_LEVEL_NAME, e))?,
		};

		validate_base_url(&base_url)?;

		if self.token_ttl_secs == 0 {
			return Err(ConfigError::invalid_var(ENV_TOKEN_TTL_SECS, "must be positive"));
		}
		if self.request_timeout.is_zero() {
			return Err(ConfigError::invalid_var(ENV_REQUEST_TIMEOUT_SECS, "must be positive"));
		}
		if !(1..=MAX_EXTERNAL_ID_LEN).contains(&self.external_id_len) {
			return Err(ConfigError::invalid_var(
				ENV_EXTERNAL_ID_LEN,
				format!("must be between 1 and {MAX_EXTERNAL_ID_LEN}"),
			));
		}

		Ok(BridgeConfig {
			credentials: self.credentials,
			base_url,
			level_name,
			token_ttl_secs: self.token_ttl_secs,
			request_timeout: self.request_timeout,
			external_id_len: self.external_id_len,
			listen_addr: self.listen_addr,
		})
	}
}

fn parse_var<T>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
	T::Err: Display,
{
	raw.map(|value| value.trim().parse::<T>().map_err(|e| ConfigError::invalid_var(name, e)))
		.transpose()
}

// Signed paths are relative to the origin, so a base path would silently break signatures.
fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if url.cannot_be_a_base() || !matches!(url.path(), "" | "/") {
		return Err(ConfigError::invalid_var(ENV_BASE_URL, "must be an origin without a path"));
	}

	let loopback = match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	};

	match url.scheme() {
		"https" => Ok(()),
		"http" if loopback => Ok(()),
		_ => Err(ConfigError::InsecureBaseUrl { url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
		let map: HashMap<&str, &str> = vars.iter().copied().collect();

		move |name: &str| map.get(name).map(|value| (*value).to_owned())
	}

	#[test]
	fn missing_credentials_are_fatal() {
		let err = BridgeConfig::from_lookup(lookup(&[(ENV_APP_SECRET, "s")]))
			.expect_err("Missing token must fail.");

		assert!(matches!(err, ConfigError::MissingVar { name: ENV_APP_TOKEN }));

		let err = BridgeConfig::from_lookup(lookup(&[(ENV_APP_TOKEN, "t"), (ENV_APP_SECRET, "")]))
			.expect_err("Empty secret must fail.");

		assert!(matches!(err, ConfigError::MissingVar { name: ENV_APP_SECRET }));
	}

	#[test]
	fn unsendable_app_token_is_fatal() {
		let err = BridgeConfig::from_lookup(lookup(&[
			(ENV_APP_TOKEN, "sbx:t\u{f6}ken"),
			(ENV_APP_SECRET, "s"),
		]))
		.expect_err("A token that cannot be sent as a header must fail.");

		assert!(matches!(err, ConfigError::InvalidVar { name: ENV_APP_TOKEN, .. }));
	}

	#[test]
	fn defaults_apply_when_only_credentials_are_set() {
		let config =
			BridgeConfig::from_lookup(lookup(&[(ENV_APP_TOKEN, "sbx:t"), (ENV_APP_SECRET, "s")]))
				.expect("Credentials alone should be enough.");

		assert_eq!(config.credentials.app_token.as_ref(), "sbx:t");
		assert_eq!(config.base_url.as_str(), "https://api.sumsub.com/");
		assert_eq!(config.level_name.as_ref(), DEFAULT_LEVEL_NAME);
		assert_eq!(config.token_ttl_secs, 600);
		assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
		assert_eq!(config.external_id_len, 15);
		assert_eq!(config.listen_addr.port(), 5000);
	}

	#[test]
	fn overrides_are_parsed() {
		let config = BridgeConfig::from_lookup(lookup(&[
			(ENV_APP_TOKEN, "sbx:t"),
			(ENV_APP_SECRET, "s"),
			(ENV_PORT, "8081"),
			(ENV_HOST, "127.0.0.1"),
			(ENV_BASE_URL, "http://127.0.0.1:9000"),
			(ENV_LEVEL_NAME, "basic-kyc-level"),
			(ENV_TOKEN_TTL_SECS, "1200"),
			(ENV_REQUEST_TIMEOUT_SECS, "3"),
			(ENV_EXTERNAL_ID_LEN, "20"),
		]))
		.expect("Overrides should parse.");

		assert_eq!(config.listen_addr, "127.0.0.1:8081".parse().expect("Socket address."));
		assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
		assert_eq!(config.level_name.as_ref(), "basic-kyc-level");
		assert_eq!(config.token_ttl_secs, 1200);
		assert_eq!(config.request_timeout, StdDuration::from_secs(3));
		assert_eq!(config.external_id_len, 20);
	}

	#[test]
	fn invalid_values_are_rejected() {
		let base = [(ENV_APP_TOKEN, "t"), (ENV_APP_SECRET, "s")];
		let with = |extra: (&'static str, &'static str)| {
			let mut vars = base.to_vec();

			vars.push(extra);

			BridgeConfig::from_lookup(lookup(&vars))
		};

		assert!(matches!(
			with((ENV_PORT, "http")),
			Err(ConfigError::InvalidVar { name: ENV_PORT, .. })
		));
		assert!(matches!(
			with((ENV_TOKEN_TTL_SECS, "0")),
			Err(ConfigError::InvalidVar { name: ENV_TOKEN_TTL_SECS, .. })
		));
		assert!(matches!(
			with((ENV_BASE_URL, "http://api.sumsub.com")),
			Err(ConfigError::InsecureBaseUrl { .. })
		));
		assert!(matches!(
			with((ENV_BASE_URL, "https://api.sumsub.com/v2")),
			Err(ConfigError::InvalidVar { name: ENV_BASE_URL, .. })
		));
		assert!(matches!(
			with((ENV_LEVEL_NAME, "a?b")),
			Err(ConfigError::InvalidVar { name: ENV_LEVEL_NAME, .. })
		));
		assert!(matches!(
			with((ENV_EXTERNAL_ID_LEN, "0")),
			Err(ConfigError::InvalidVar { name: ENV_EXTERNAL_ID_LEN, .. })
		));
	}
}
