//! Strongly typed identifiers used on both sides of the bridge.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $validate:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				$validate($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$validate($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 256;

/// Default length of generated external user identifiers.
pub const DEFAULT_EXTERNAL_ID_LEN: usize = 15;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (applicant, external user, level, app token).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (applicant, external user, level, app token).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (applicant, external user, level, app token).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// The identifier contains a character outside its allowed alphabet.
	#[error("{kind} identifier contains the disallowed character {found:?}.")]
	DisallowedChar {
		/// Kind of identifier (applicant, external user, level, app token).
		kind: &'static str,
		/// First offending character.
		found: char,
	},
}

def_id! { ApplicantId, "Provider-assigned applicant identifier.", "Applicant", validate_view }
def_id! {
	ExternalUserId,
	"Bridge-side identifier correlating an applicant with the caller's notion of a user.",
	"ExternalUser",
	validate_view
}
def_id! {
	LevelName,
	"Provider-defined verification level (a named bundle of checks).",
	"Level",
	validate_query_safe
}
def_id! {
	AppToken,
	"Application token sent in the `X-App-Token` header.",
	"AppToken",
	validate_header_safe
}

impl ExternalUserId {
	/// Generates a random identifier of `len` characters drawn from `[A-Za-z0-9]`.
	///
	/// Uniqueness is probabilistic only.
	pub fn generate(len: usize) -> Self {
		let value = rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect();

		Self(value)
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

// Level names are spliced into the applicant query string and signed verbatim.
fn validate_query_safe(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	validate_view(kind, view)?;

	match view.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))) {
		Some(found) => Err(IdentifierError::DisallowedChar { kind, found }),
		None => Ok(()),
	}
}

// Anything outside visible ASCII is rejected by the HTTP stack only when a request is built.
fn validate_header_safe(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	validate_view(kind, view)?;

	match view.chars().find(|c| !c.is_ascii_graphic()) {
		Some(found) => Err(IdentifierError::DisallowedChar { kind, found }),
		None => Ok(()),
	}
}
