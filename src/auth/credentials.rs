//! API key pair owned by a client for its whole lifetime.

// self
use crate::{_prelude::*, error::SigningError};

/// Public API key; appears as the `iss` claim of every token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);
impl ApiKey {
	/// Wraps a key string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ApiKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ApiKey({})", self.0)
	}
}
impl Display for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Redacted API secret wrapper keeping signing material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);
impl ApiSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ApiSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiSecret").field(&"<redacted>").finish()
	}
}
impl Display for ApiSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable key pair used to sign every outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Public API key.
	pub key: ApiKey,
	/// Shared signing secret.
	pub secret: ApiSecret,
}
impl Credentials {
	/// Creates a key pair from raw strings.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: ApiKey::new(key), secret: ApiSecret::new(secret) }
	}

	/// Ensures both halves are usable for signing.
	pub fn validate(&self) -> Result<(), SigningError> {
		if self.key.as_str().trim().is_empty() {
			return Err(SigningError::EmptyKey);
		}
		if self.secret.expose().is_empty() {
			return Err(SigningError::EmptySecret);
		}

		Ok(())
	}
}
