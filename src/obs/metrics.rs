// self
use crate::{_prelude::*, http::Verb, obs::RequestOutcome};

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(verb: Verb, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"zoom_api_request_total",
			"verb" => verb.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (verb, outcome);
	}
}

/// Records a throttle stall, emitting a warning event when tracing is enabled.
pub fn record_throttle_stall(admitted: u32, wait: Duration) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("zoom_api_throttle_stall_total").increment(1);
	}
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			admitted,
			wait_ms = u64::try_from(wait.whole_milliseconds()).unwrap_or(u64::MAX),
			"Throttle window exhausted; stalling."
		);
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (admitted, wait);
	}
}

/// Records a fresh throttle window, emitting a debug event when tracing is enabled.
pub fn record_throttle_reset(window_start: OffsetDateTime) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(%window_start, "Throttle window reset.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = window_start;
	}
}
