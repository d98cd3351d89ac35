//! Request bodies and opaque response records exchanged with the provider.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{ApplicantId, ExternalUserId, LevelName, TokenSecret},
};

/// Applicant record; only `id` is interpreted, everything else passes through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
	/// Provider-assigned identifier.
	pub id: ApplicantId,
	/// Remaining provider fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Access-token record minted for one applicant and level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Short-lived WebSDK token.
	pub token: TokenSecret,
	/// Applicant the token is scoped to, echoed back by the provider.
	#[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Remaining provider fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateApplicantBody<'a> {
	pub external_user_id: &'a ExternalUserId,
}

// Field order is part of the signed body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MintAccessTokenBody<'a> {
	pub ttl_in_secs: u32,
	pub user_id: &'a ApplicantId,
	pub level_name: &'a LevelName,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn applicant_keeps_unknown_fields() {
		let applicant: Applicant = serde_json::from_str(
			r#"{"id":"A1","createdAt":"2024-01-01 00:00:00","review":{"reviewStatus":"init"}}"#,
		)
		.expect("Applicant payload should deserialize.");

		assert_eq!(applicant.id.as_ref(), "A1");
		assert_eq!(applicant.extra.len(), 2);
		assert_eq!(applicant.extra["review"]["reviewStatus"], "init");
	}

	#[test]
	fn access_token_user_id_is_optional() {
		let token: AccessToken =
			serde_json::from_str(r#"{"token":"T1"}"#).expect("Minimal token should deserialize.");

		assert_eq!(token.token.expose(), "T1");
		assert!(token.user_id.is_none());
		assert!(token.extra.is_empty());
	}

	#[test]
	fn request_bodies_serialize_in_provider_shape() {
		let external = ExternalUserId::new("abc123").expect("External id fixture is valid.");
		let applicant = ApplicantId::new("A1").expect("Applicant id fixture is valid.");
		let level = LevelName::new("id-and-liveness").expect("Level fixture is valid.");

		assert_eq!(
			serde_json::to_string(&CreateApplicantBody { external_user_id: &external })
				.expect("Serialize applicant body."),
			r#"{"externalUserId":"abc123"}"#
		);
		assert_eq!(
			serde_json::to_string(&MintAccessTokenBody {
				ttl_in_secs: 600,
				user_id: &applicant,
				level_name: &level,
			})
			.expect("Serialize token body."),
			r#"{"ttlInSecs":600,"userId":"A1","levelName":"id-and-liveness"}"#
		);
	}
}
