//! Request signing contract used by the client to mint bearer tokens.

// self
use crate::{_prelude::*, error::SigningError};

/// Produces the bearer token attached to one outbound request.
///
/// The client calls [`bearer_token`](RequestSigner::bearer_token) exactly once per request,
/// after the throttle admits it, so implementations must not hand out a cached token whose
/// expiry may lapse during the round trip.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Mints a token valid from `now`.
	fn bearer_token(&self, now: OffsetDateTime) -> Result<String, SigningError>;
}
