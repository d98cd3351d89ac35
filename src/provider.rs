//! Identity-verification provider client.
//!
//! [`ProviderClient`] issues the two calls a session bootstrap needs. Each call serializes its
//! body once, signs those exact bytes with a fresh timestamp, and sends them with the
//! `X-App-Token` / `X-App-Access-Ts` / `X-App-Access-Sig` triplet. Non-success responses are
//! surfaced with the provider's raw body; provider error codes are not interpreted.

mod record;

pub use record::*;

// self
use crate::{
	_prelude::*,
	auth::{ApplicantId, ExternalUserId, LevelName},
	config::BridgeConfig,
	error::{ConfigError, UpstreamError},
	http::{self, ReqwestHttpClient},
	obs::{self, FlowKind},
	sign::RequestSigner,
};

const APPLICANTS_PATH: &str = "/resources/applicants";
const ACCESS_TOKENS_PATH: &str = "/resources/accessTokens/sdk";

/// Signed client for the provider's REST API.
#[derive(Clone, Debug)]
pub struct ProviderClient {
	http_client: ReqwestHttpClient,
	signer: RequestSigner,
	base_url: Url,
	timeout: StdDuration,
}
impl ProviderClient {
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: &BridgeConfig,
		http_client: ReqwestHttpClient,
	) -> Result<Self, ConfigError> {
		let credentials = &config.credentials;
		let signer = RequestSigner::new(credentials.app_token.clone(), &credentials.app_secret)?;

		Ok(Self {
			http_client,
			signer,
			base_url: config.base_url.clone(),
			timeout: config.request_timeout,
		})
	}

	/// Creates a client with the default provider transport.
	pub fn new(config: &BridgeConfig) -> Result<Self, ConfigError> {
		Self::with_http_client(config, ReqwestHttpClient::for_provider()?)
	}

	/// Registers a new applicant for `external_user_id` at `level_name`.
	pub async fn create_applicant(
		&self,
		external_user_id: &ExternalUserId,
		level_name: &LevelName,
	) -> Result<Applicant> {
		// `LevelName` only admits query-safe characters, so no escaping is needed.
		let path = format!("{APPLICANTS_PATH}?levelName={level_name}");
		let body = CreateApplicantBody { external_user_id };

		obs::observe(
			FlowKind::CreateApplicant,
			"create_applicant",
			self.post_signed(FlowKind::CreateApplicant, &path, &body),
		)
		.await
	}

	/// Mints a WebSDK access token for `user_id`.
	pub async fn mint_access_token(
		&self,
		user_id: &ApplicantId,
		ttl_in_secs: u32,
		level_name: &LevelName,
	) -> Result<AccessToken> {
		let body = MintAccessTokenBody { ttl_in_secs, user_id, level_name };

		obs::observe(
			FlowKind::MintAccessToken,
			"mint_access_token",
			self.post_signed(FlowKind::MintAccessToken, ACCESS_TOKENS_PATH, &body),
		)
		.await
	}

	async fn post_signed<B, T>(&self, call: FlowKind, path_and_query: &str, body: &B) -> Result<T>
	where
		B: Serialize,
		T: DeserializeOwned,
	{
		let url = self
			.base_url
			.join(path_and_query)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let payload = serde_json::to_string(body)
			.map_err(|e| ConfigError::RequestBuild { source: Box::new(e) })?;
		let signed = self.signer.sign_now(&Method::POST, path_and_query, &payload);
		let request = self
			.http_client
			.post(url)
			.timeout(self.timeout)
			.header(reqwest::header::CONTENT_TYPE, "application/json");
		let response = self
			.signer
			.attach(request, &signed)
			.body(payload)
			.send()
			.await
			.map_err(|e| http::map_reqwest_error(call, self.timeout, e))?;
		let status = response.status();
		let bytes =
			response.bytes().await.map_err(|e| http::map_reqwest_error(call, self.timeout, e))?;

		if !status.is_success() {
			return Err(UpstreamError::Status {
				call,
				status: status.as_u16(),
				body: String::from_utf8_lossy(&bytes).into_owned(),
			}
			.into());
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| UpstreamError::ResponseParse { call, source }.into())
	}
}
