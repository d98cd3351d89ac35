//! Credentials and identifiers exchanged with the verification provider.

pub mod id;
pub mod secret;

pub use id::*;
pub use secret::*;
