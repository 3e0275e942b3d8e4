//! Fixed-window request throttle that keeps a client within the server's per-second quota.
//!
//! [`ThrottleState`] is the pure state machine: a window is *fresh* while
//! `now < window_start + window` and *stale* afterwards, at which point it must be re-armed
//! before its count is trusted. [`ThrottleGate`] wraps the state in an async mutex and adds the
//! stall: once `limit` requests were admitted inside the current window, the next caller
//! waits until the window rolls over. Callers queue behind the stalled one, so the
//! check-reset-increment sequence in [`ThrottleGate::admit`] is atomic across tasks.

// self
use crate::{
	_prelude::*,
	error::ThrottleError,
	ext::{Clock, SystemClock},
	obs,
};

/// Requests allowed per window unless configured otherwise.
pub const DEFAULT_LIMIT: u32 = 10;
/// Width of the throttle window unless configured otherwise.
pub const DEFAULT_WINDOW: Duration = Duration::SECOND;

/// Static throttle parameters fixed at client construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleConfig {
	/// Requests admitted per window before callers stall.
	pub limit: u32,
	/// Width of one window.
	pub window: Duration,
	/// Longest stall a caller accepts; `None` waits as long as the window requires.
	pub max_stall: Option<Duration>,
}
impl ThrottleConfig {
	/// Overrides the per-window limit.
	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = limit;

		self
	}

	/// Overrides the window width.
	pub fn with_window(mut self, window: Duration) -> Self {
		self.window = window;

		self
	}

	/// Caps how long a stall may last before failing with [`ThrottleError::StallExceeded`].
	pub fn with_max_stall(mut self, max_stall: Duration) -> Self {
		self.max_stall = Some(max_stall);

		self
	}
}
impl Default for ThrottleConfig {
	fn default() -> Self {
		Self { limit: DEFAULT_LIMIT, window: DEFAULT_WINDOW, max_stall: None }
	}
}

/// Window bookkeeping: start instant plus the number of requests admitted since.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrottleState {
	window_start: Option<OffsetDateTime>,
	count: u32,
	limit: u32,
	window: Duration,
}
impl ThrottleState {
	/// Creates an unarmed state; the first [`reset`](Self::reset) always succeeds.
	pub fn new(limit: u32, window: Duration) -> Self {
		Self { window_start: None, count: 0, limit, window }
	}

	/// Whether the current window has elapsed (or was never started).
	pub fn is_stale(&self, now: OffsetDateTime) -> bool {
		match self.window_start {
			None => true,
			Some(start) => now >= start + self.window,
		}
	}

	/// Re-arms a stale window at `now` with a zero count; returns whether a reset occurred.
	pub fn reset(&mut self, now: OffsetDateTime) -> bool {
		if !self.is_stale(now) {
			return false;
		}

		self.window_start = Some(now);
		self.count = 0;

		true
	}

	/// Whether the window has admitted `limit` requests already.
	pub fn is_exhausted(&self) -> bool {
		self.count >= self.limit
	}

	/// Instant at which the current window becomes stale.
	pub fn window_end(&self) -> Option<OffsetDateTime> {
		self.window_start.map(|start| start + self.window)
	}

	/// Counts one admitted request.
	pub fn record(&mut self) {
		self.count = self.count.saturating_add(1);
	}

	/// Start of the current window, if one was armed.
	pub fn window_start(&self) -> Option<OffsetDateTime> {
		self.window_start
	}

	/// Requests admitted in the current window.
	pub fn count(&self) -> u32 {
		self.count
	}

	/// Configured per-window limit.
	pub fn limit(&self) -> u32 {
		self.limit
	}
}

/// How a throttle check resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleOutcome {
	/// The previous window was stale; a fresh one started immediately.
	Reset,
	/// The current window still had quota.
	WithinWindow,
	/// The caller waited for the window to roll over.
	Stalled {
		/// Time spent waiting.
		waited: Duration,
	},
}

/// Point-in-time copy of the throttle counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleSnapshot {
	/// Start of the current window, if one was armed.
	pub window_start: Option<OffsetDateTime>,
	/// Requests admitted in the current window.
	pub count: u32,
	/// Configured per-window limit.
	pub limit: u32,
}

/// Shared throttle gate owned by one client.
pub struct ThrottleGate {
	state: AsyncMutex<ThrottleState>,
	clock: Arc<dyn Clock>,
	max_stall: Option<Duration>,
}
impl ThrottleGate {
	/// Creates a gate that reads time from `clock`.
	pub fn new(config: ThrottleConfig, clock: Arc<dyn Clock>) -> Self {
		Self {
			state: AsyncMutex::new(ThrottleState::new(config.limit, config.window)),
			clock,
			max_stall: config.max_stall,
		}
	}

	/// Creates a gate driven by the system clock.
	pub fn with_system_clock(config: ThrottleConfig) -> Self {
		Self::new(config, Arc::new(SystemClock))
	}

	/// Re-arms the window if it is stale; returns whether a reset occurred.
	pub async fn reset_throttle(&self) -> bool {
		let now = self.clock.now();
		let reset = self.state.lock().await.reset(now);

		if reset {
			obs::record_throttle_reset(now);
		}

		reset
	}

	/// Waits, if needed, until a request may proceed. Does not count the request.
	pub async fn maybe_throttle(&self) -> Result<ThrottleOutcome> {
		let mut state = self.state.lock().await;

		Ok(self.throttle_locked(&mut state).await?)
	}

	/// Waits, if needed, and counts the request, all under one lock.
	pub async fn admit(&self) -> Result<ThrottleOutcome> {
		let mut state = self.state.lock().await;
		let outcome = self.throttle_locked(&mut state).await?;

		state.record();

		Ok(outcome)
	}

	/// Copies the current counters.
	pub async fn snapshot(&self) -> ThrottleSnapshot {
		let state = self.state.lock().await;

		ThrottleSnapshot {
			window_start: state.window_start(),
			count: state.count(),
			limit: state.limit(),
		}
	}

	async fn throttle_locked(
		&self,
		state: &mut ThrottleState,
	) -> Result<ThrottleOutcome, ThrottleError> {
		let started = self.clock.now();

		if state.reset(started) {
			obs::record_throttle_reset(started);

			return Ok(ThrottleOutcome::Reset);
		}
		if !state.is_exhausted() {
			return Ok(ThrottleOutcome::WithinWindow);
		}

		let required = state.window_end().unwrap_or(started) - started;

		if let Some(allowed) = self.max_stall.filter(|allowed| required > *allowed) {
			return Err(ThrottleError::StallExceeded { required, allowed });
		}

		obs::record_throttle_stall(state.count(), required);

		loop {
			let deadline = state.window_end().unwrap_or(started);

			self.clock.sleep_until(deadline).await;

			let now = self.clock.now();

			if state.reset(now) {
				obs::record_throttle_reset(now);

				return Ok(ThrottleOutcome::Stalled { waited: now - started });
			}
		}
	}
}
impl Debug for ThrottleGate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ThrottleGate").field("max_stall", &self.max_stall).finish()
	}
}
