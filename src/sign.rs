//! Provider request signing.
//!
//! Every call to the provider is authenticated with three headers: the application token, the
//! call timestamp, and a lowercase-hex HMAC-SHA256 over `timestamp || method || path || body`
//! keyed by the shared secret. The concatenation has no delimiters and `path` includes the query
//! string exactly as sent. The provider rejects stale timestamps, so each call signs with a fresh
//! one via [`RequestSigner::sign_now`].

// crates.io
use hmac::{Hmac, Mac};
use reqwest::RequestBuilder;
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{AppSecret, AppToken},
	error::ConfigError,
};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the application token.
pub const APP_TOKEN_HEADER: &str = "X-App-Token";
/// Header carrying the signing timestamp (unix seconds).
pub const ACCESS_TS_HEADER: &str = "X-App-Access-Ts";
/// Header carrying the hex signature.
pub const ACCESS_SIG_HEADER: &str = "X-App-Access-Sig";

/// Hex-encoded request signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(String);
impl Signature {
	/// Returns the hex digest.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Signature").field(&"<redacted>").finish()
	}
}

/// Timestamp + signature pair for a single outbound request.
#[derive(Clone, Debug)]
pub struct SignedHeaders {
	/// Unix seconds rendered as a decimal string.
	pub timestamp: String,
	/// Signature computed over the request with `timestamp`.
	pub signature: Signature,
}

/// Signs provider requests with the shared secret.
///
/// The keyed MAC is prepared once; each signature clones that state, so signing never fails
/// after construction.
#[derive(Clone)]
pub struct RequestSigner {
	app_token: AppToken,
	mac: HmacSha256,
}
impl RequestSigner {
	/// Prepares a signer for the given credentials.
	pub fn new(app_token: AppToken, secret: &AppSecret) -> Result<Self, ConfigError> {
		let mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
			.map_err(|_| ConfigError::InvalidSigningKey)?;

		Ok(Self { app_token, mac })
	}

	/// Application token sent alongside every signature.
	pub fn app_token(&self) -> &AppToken {
		&self.app_token
	}

	/// Computes the signature for an explicit timestamp.
	pub fn sign(
		&self,
		timestamp: &str,
		method: &Method,
		path_and_query: &str,
		body: &str,
	) -> Signature {
		let mut mac = self.mac.clone();

		mac.update(timestamp.as_bytes());
		mac.update(method.as_str().as_bytes());
		mac.update(path_and_query.as_bytes());
		mac.update(body.as_bytes());

		Signature(hex::encode(mac.finalize().into_bytes()))
	}

	/// Signs with the current unix time.
	pub fn sign_now(&self, method: &Method, path_and_query: &str, body: &str) -> SignedHeaders {
		let timestamp = unix_timestamp();
		let signature = self.sign(&timestamp, method, path_and_query, body);

		SignedHeaders { timestamp, signature }
	}

	/// Attaches the header triplet to a reqwest builder.
	pub fn attach(&self, request: RequestBuilder, headers: &SignedHeaders) -> RequestBuilder {
		request
			.header(APP_TOKEN_HEADER, self.app_token.as_ref())
			.header(ACCESS_TS_HEADER, headers.timestamp.as_str())
			.header(ACCESS_SIG_HEADER, headers.signature.as_str())
	}
}
impl Debug for RequestSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestSigner").field("app_token", &self.app_token).finish_non_exhaustive()
	}
}

/// Current unix time in whole seconds, as the provider expects it.
pub fn unix_timestamp() -> String {
	OffsetDateTime::now_utc().unix_timestamp().to_string()
}
