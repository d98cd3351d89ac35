//! Signed passthrough bridge between browser clients and the Sumsub identity-verification API.
//!
//! The crate mints short-lived WebSDK access tokens: it registers a fresh applicant, asks the
//! provider for a token scoped to that applicant, and hands both identifiers back to the browser.
//! Every outbound call is authenticated with the provider's HMAC-SHA256 request signature.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;
pub mod sign;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(any(test, feature = "server"))] use color_eyre as _;
#[cfg(test)] use httpmock as _;
