//! Client-level error types shared across signing, throttling, and transport.

// self
use crate::{_prelude::*, config::ClientConfigError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Client-error responses (4xx) are not represented here; they come back as
/// [`ApiResponse::ClientError`](crate::client::ApiResponse::ClientError) data.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credentials could not produce a signed token.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Throttle refused to wait for the next window.
	#[error(transparent)]
	Throttle(#[from] ThrottleError),
	/// Server-side failure (5xx).
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into a JSON object.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client configuration failed validation.
	#[error(transparent)]
	Invalid(#[from] ClientConfigError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Resource path cannot be joined onto the base URL.
	#[error("Resource path `{path}` is invalid.")]
	InvalidPath {
		/// Path supplied by the caller.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request fields could not be serialized as JSON.
	#[error("Request body could not be encoded as JSON.")]
	RequestEncode(#[source] serde_json::Error),
	/// Request fields could not be encoded as a query string.
	#[error("Request query could not be encoded.")]
	QueryEncode {
		/// Underlying encoder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Token signing failures; raised before any network call is attempted.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// API key is empty or whitespace.
	#[error("API key must not be empty.")]
	EmptyKey,
	/// API secret is empty.
	#[error("API secret must not be empty.")]
	EmptySecret,
	/// Token could not be encoded.
	#[error("Bearer token could not be encoded.")]
	Encode(#[from] jsonwebtoken::errors::Error),
}

/// Throttle failures.
#[derive(Debug, ThisError)]
pub enum ThrottleError {
	/// Waiting for the next window would exceed the configured stall limit.
	#[error("Throttle stall of {required} exceeds the allowed {allowed}.")]
	StallExceeded {
		/// Time until the current window rolls over.
		required: Duration,
		/// Configured maximum stall.
		allowed: Duration,
	},
}

/// Temporary upstream failures.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// API responded with a 5xx status.
	#[error("API returned server error {status}: {message}.")]
	Server {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		message: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not valid JSON or not a JSON object.
	#[error("API returned a body that is not a JSON object (status {status}).")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code.
		status: u16,
	},
	/// Body holds a JSON object followed by more non-whitespace input.
	#[error("API returned trailing data after the JSON object (status {status}).")]
	TrailingData {
		/// Parser failure at the trailing input.
		#[source]
		source: serde_json::Error,
		/// HTTP status code.
		status: u16,
	},
}
