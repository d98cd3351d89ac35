//! Maps bridge errors onto HTTP responses.

// crates.io
use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
// self
use crate::{_prelude::*, error::TransportError};

/// Handler error wrapper; renders `{ "error": <message> }`.
#[derive(Debug)]
pub struct ApiError(pub Error);
impl ApiError {
	/// Status code reported to the browser.
	pub fn status(&self) -> StatusCode {
		match &self.0 {
			Error::Transport(TransportError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}
impl<E> From<E> for ApiError
where
	E: Into<Error>,
{
	fn from(e: E) -> Self {
		Self(e.into())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();

		tracing::error!(status = status.as_u16(), error = %self.0, "Session bootstrap failed.");

		(status, Json(ErrorBody { error: self.0.to_string() })).into_response()
	}
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable failure description.
	pub error: String,
}
