//! Bridge-level error types shared across configuration, signing, and provider calls.

// self
use crate::{_prelude::*, obs::FlowKind};

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical bridge error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider answered, but not with something usable.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns `true` when the failure was an outbound call exceeding its deadline.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Timeout { .. }))
	}
}

/// Configuration and validation failures raised while assembling the bridge.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required environment variable is absent or empty.
	#[error("Missing required configuration value `{name}`.")]
	MissingVar {
		/// Variable name.
		name: &'static str,
	},
	/// A configuration value could not be parsed.
	#[error("Configuration value `{name}` is invalid: {reason}.")]
	InvalidVar {
		/// Variable name.
		name: &'static str,
		/// Human-readable parse failure.
		reason: String,
	},
	/// Provider base URL cannot be parsed or joined.
	#[error("Provider base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider base URL must use HTTPS outside of loopback hosts.
	#[error("Provider base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The shared secret was rejected as an HMAC key.
	#[error("Shared secret cannot be used as a signing key.")]
	InvalidSigningKey,
	/// An outbound request could not be assembled.
	#[error("Request to the provider could not be built.")]
	RequestBuild {
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_var(name: &'static str, reason: impl Display) -> Self {
		Self::InvalidVar { name, reason: reason.to_string() }
	}
}

/// Failures where the provider responded but the call still did not succeed.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Provider returned a non-success HTTP status; `body` is the raw response text.
	#[error("{} failed with HTTP {status}: {body}", .call.failure_label())]
	Status {
		/// Provider call that failed.
		call: FlowKind,
		/// HTTP status code.
		status: u16,
		/// Raw response body returned by the provider.
		body: String,
	},
	/// Provider responded with JSON that does not match the expected record.
	#[error("{} returned malformed JSON at `{}`.", .call.failure_label(), .source.path())]
	ResponseParse {
		/// Provider call that failed.
		call: FlowKind,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures (network, IO, deadlines).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("{} failed with a network error: {source}.", .call.failure_label())]
	Network {
		/// Provider call that failed.
		call: FlowKind,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Outbound call exceeded the configured request timeout.
	#[error("{} timed out after {}ms.", .call.failure_label(), .after.as_millis())]
	Timeout {
		/// Provider call that failed.
		call: FlowKind,
		/// Deadline that elapsed.
		after: StdDuration,
	},
	/// Underlying IO failure surfaced while serving.
	#[error("I/O error occurred: {0}.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(call: FlowKind, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { call, source: Box::new(src) }
	}
}
