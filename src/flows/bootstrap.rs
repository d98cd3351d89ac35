//! Session bootstrap: fresh external id → applicant → access token.
//!
//! The two provider calls are strictly sequential because the token request names the applicant
//! created by the first call. Any failure short-circuits, so callers either get a complete
//! [`SessionGrant`] or an error, never an applicant without a token.
//!
//! Refreshing a WebSDK session runs this flow again, which registers another applicant.

// self
use crate::{
	_prelude::*,
	auth::{ApplicantId, ExternalUserId, TokenSecret},
	flows::SessionBroker,
	obs::{self, FlowKind},
};

/// Successful bootstrap payload handed to the browser.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
	/// WebSDK access token.
	pub token: TokenSecret,
	/// Provider applicant identifier.
	pub user_id: ApplicantId,
	/// Generated external user identifier.
	pub external_user_id: ExternalUserId,
}

impl SessionBroker {
	/// Registers a new applicant and mints an access token scoped to it.
	pub async fn bootstrap_session(&self) -> Result<SessionGrant> {
		obs::observe(FlowKind::Bootstrap, "bootstrap_session", async move {
			let settings = &self.settings;
			let external_user_id = ExternalUserId::generate(settings.external_id_len);
			let applicant =
				self.client.create_applicant(&external_user_id, &settings.level_name).await?;
			let access = self
				.client
				.mint_access_token(&applicant.id, settings.token_ttl_secs, &settings.level_name)
				.await?;

			Ok(SessionGrant { token: access.token, user_id: applicant.id, external_user_id })
		})
		.await
	}
}
