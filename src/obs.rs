//! Optional observability helpers for client requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `zoom_api.request` with the `verb` and
//!   `path` fields, plus a warning event whenever the throttle stalls a caller.
//! - Enable `metrics` to increment the `zoom_api_request_total` counter for every
//!   attempt/success/client error/failure, labeled by `verb` + `outcome`, and the
//!   `zoom_api_throttle_stall_total` counter for every stall.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a verb operation.
	Attempt,
	/// 2xx/3xx response.
	Success,
	/// 4xx response returned to the caller as data.
	ClientError,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::ClientError => "client_error",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
