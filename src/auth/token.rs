//! Short-lived HS256 bearer tokens minted per request.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{_prelude::*, auth::Credentials, error::SigningError, ext::RequestSigner};

/// Validity window applied to every token unless overridden.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::seconds(60);

/// Claims carried by every bearer token: exactly the issuer and the expiry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// API key of the caller.
	pub iss: String,
	/// Unix timestamp after which the token is rejected.
	pub exp: i64,
}
impl TokenClaims {
	/// Builds the claims for a token minted at `now`.
	pub fn new(key: &str, now: OffsetDateTime, ttl: Duration) -> Self {
		Self { iss: key.to_owned(), exp: (now + ttl).unix_timestamp() }
	}
}

/// Signs `{iss: key, exp: now + 60}` with the credential secret.
pub fn sign(credentials: &Credentials, now: OffsetDateTime) -> Result<String, SigningError> {
	sign_with_ttl(credentials, now, DEFAULT_TOKEN_TTL)
}

/// Signs a token whose expiry is `now + ttl`.
pub fn sign_with_ttl(
	credentials: &Credentials,
	now: OffsetDateTime,
	ttl: Duration,
) -> Result<String, SigningError> {
	credentials.validate()?;

	let claims = TokenClaims::new(credentials.key.as_str(), now, ttl);
	let key = EncodingKey::from_secret(credentials.secret.expose().as_bytes());

	Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

/// Default [`RequestSigner`] that mints a fresh JWT for every call and never caches.
#[derive(Clone, Debug)]
pub struct JwtSigner {
	credentials: Credentials,
	ttl: Duration,
}
impl JwtSigner {
	/// Creates a signer with the default 60 second validity window.
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials, ttl: DEFAULT_TOKEN_TTL }
	}

	/// Overrides the validity window.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;

		self
	}

	/// Returns the credential pair backing the signer.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Returns the configured validity window.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}
impl RequestSigner for JwtSigner {
	fn bearer_token(&self, now: OffsetDateTime) -> Result<String, SigningError> {
		sign_with_ttl(&self.credentials, now, self.ttl)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use jsonwebtoken::{DecodingKey, Validation};
	use time::macros::datetime;
	// self
	use super::*;

	fn decode(token: &str, secret: &str) -> TokenClaims {
		let mut validation = Validation::new(Algorithm::HS256);

		validation.validate_exp = false;

		jsonwebtoken::decode::<TokenClaims>(
			token,
			&DecodingKey::from_secret(secret.as_bytes()),
			&validation,
		)
		.expect("Token should verify with the signing secret.")
		.claims
	}

	#[test]
	fn sign_embeds_issuer_and_expiry() {
		let credentials = Credentials::new("api-key", "api-secret");
		let now = datetime!(2024-03-01 12:00:00 UTC);
		let token = sign(&credentials, now).expect("Signing should succeed.");
		let header = jsonwebtoken::decode_header(&token).expect("Header should decode.");

		assert_eq!(header.alg, Algorithm::HS256);
		assert_eq!(token.split('.').count(), 3);
		assert_eq!(
			decode(&token, "api-secret"),
			TokenClaims { iss: "api-key".into(), exp: now.unix_timestamp() + 60 }
		);
	}

	#[test]
	fn tokens_one_second_apart_differ_in_expiry() {
		let signer = JwtSigner::new(Credentials::new("api-key", "api-secret"));
		let now = datetime!(2024-03-01 12:00:00 UTC);
		let first = signer.bearer_token(now).expect("First token should sign.");
		let second = signer.bearer_token(now + Duration::SECOND).expect("Second token should sign.");

		assert_ne!(first, second);
		assert_eq!(decode(&second, "api-secret").exp - decode(&first, "api-secret").exp, 1);
	}

	#[test]
	fn token_fails_verification_with_other_secret() {
		let token = sign(&Credentials::new("api-key", "api-secret"), OffsetDateTime::now_utc())
			.expect("Signing should succeed.");
		let result = jsonwebtoken::decode::<TokenClaims>(
			&token,
			&DecodingKey::from_secret(b"other-secret"),
			&Validation::new(Algorithm::HS256),
		);

		assert!(result.is_err());
	}

	#[test]
	fn empty_secret_fails_before_encoding() {
		let err = sign(&Credentials::new("api-key", ""), OffsetDateTime::now_utc())
			.expect_err("Empty secrets must be rejected.");

		assert!(matches!(err, SigningError::EmptySecret));
	}

	#[test]
	fn custom_ttl_shifts_expiry() {
		let signer =
			JwtSigner::new(Credentials::new("api-key", "api-secret")).with_ttl(Duration::seconds(5));
		let now = datetime!(2024-03-01 12:00:00 UTC);
		let token = signer.bearer_token(now).expect("Signing should succeed.");

		assert_eq!(decode(&token, "api-secret").exp, now.unix_timestamp() + 5);
	}
}
