//! Secret wrappers that redact sensitive material.

// self
use crate::_prelude::*;

/// Redacted access-token wrapper keeping sensitive material out of logs.
///
/// Serializes transparently because the token is the payload handed to the browser.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Shared secret used to key request signatures. Never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);
impl AppSecret {
	/// Wraps the shared secret.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw key bytes for MAC construction.
	pub(crate) fn as_bytes(&self) -> &[u8] {
		self.0.as_bytes()
	}
}
impl Debug for AppSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AppSecret").field(&"<redacted>").finish()
	}
}
