//! Tagged response type and the decoding rules shared by every verb.

// self
use crate::{
	_prelude::*,
	error::{DecodeError, TransientError, TransportError},
	http,
};

/// Decoded JSON object, used both for request fields and response bodies.
pub type Fields = Map<String, Value>;

/// Field injected with the HTTP status by [`ApiResponse::into_normalized`].
pub const CODE_FIELD: &str = "code";

/// Result of a request that reached the API and was not a server error.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
	/// 2xx/3xx response.
	Success {
		/// HTTP status code.
		status: u16,
		/// Decoded body; empty when the API returned no content.
		body: Fields,
	},
	/// 4xx response, returned as data rather than raised.
	ClientError {
		/// HTTP status code.
		status: u16,
		/// Decoded error body exactly as the API sent it.
		body: Fields,
		/// Retry-After hint, typically present on 429.
		retry_after: Option<Duration>,
	},
}
impl ApiResponse {
	/// HTTP status code.
	pub fn status(&self) -> u16 {
		match self {
			Self::Success { status, .. } | Self::ClientError { status, .. } => *status,
		}
	}

	/// Decoded body.
	pub fn body(&self) -> &Fields {
		match self {
			Self::Success { body, .. } | Self::ClientError { body, .. } => body,
		}
	}

	/// Looks up a top-level body field.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.body().get(field)
	}

	/// Whether this is the success variant.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	/// Consumes the response, returning the decoded body.
	pub fn into_body(self) -> Fields {
		match self {
			Self::Success { body, .. } | Self::ClientError { body, .. } => body,
		}
	}

	/// Flattens into a single mapping.
	///
	/// Success bodies gain a `code` field holding the HTTP status, replacing any `code` the
	/// body carried. Client-error bodies are returned untouched, so an API error code such as
	/// `{"code": 300}` survives; use [`status`](Self::status) for the HTTP status there.
	pub fn into_normalized(self) -> Fields {
		match self {
			Self::Success { status, mut body } => {
				body.insert(CODE_FIELD.into(), Value::from(status));

				body
			},
			Self::ClientError { body, .. } => body,
		}
	}
}

/// Reads and classifies a response: 5xx fails, 4xx and the rest decode into [`ApiResponse`].
pub(crate) async fn normalize(response: reqwest::Response) -> Result<ApiResponse> {
	let status = response.status();
	let retry_after = http::parse_retry_after(response.headers());
	let bytes = response.bytes().await.map_err(TransportError::from)?;

	if status.is_server_error() {
		return Err(TransientError::Server {
			status: status.as_u16(),
			message: String::from_utf8_lossy(&bytes).trim().to_owned(),
			retry_after,
		}
		.into());
	}

	let body = decode_body(status.as_u16(), &bytes)?;

	if status.is_client_error() {
		Ok(ApiResponse::ClientError { status: status.as_u16(), body, retry_after })
	} else {
		Ok(ApiResponse::Success { status: status.as_u16(), body })
	}
}

/// Decodes a JSON object body; blank bodies decode to an empty mapping.
pub(crate) fn decode_body(status: u16, bytes: &[u8]) -> Result<Fields, DecodeError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Fields::new());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	let body = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::ResponseParse { source, status })?;

	deserializer.end().map_err(|source| DecodeError::TrailingData { source, status })?;

	Ok(body)
}
