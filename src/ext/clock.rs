//! Time source contracts shared by the throttle and the token signer.

// self
use crate::_prelude::*;

/// Boxed future returned by [`Clock::sleep_until`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Source of wall-clock time plus the ability to wait for a deadline.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Current instant.
	fn now(&self) -> OffsetDateTime;

	/// Resolves once `now() >= deadline`. Dropping the future cancels the wait.
	fn sleep_until(&self, deadline: OffsetDateTime) -> SleepFuture<'_>;
}

/// Real clock backed by `OffsetDateTime::now_utc` and the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}

	fn sleep_until(&self, deadline: OffsetDateTime) -> SleepFuture<'_> {
		Box::pin(async move {
			let remaining = deadline - OffsetDateTime::now_utc();

			if remaining.is_positive() {
				tokio::time::sleep(remaining.unsigned_abs()).await;
			}
		})
	}
}

/// Deterministic clock whose sleeps advance its own time instantly.
///
/// Every requested sleep is recorded so callers can assert when a stall happened and how
/// long it lasted.
#[derive(Clone, Debug)]
pub struct ManualClock {
	now: Arc<Mutex<OffsetDateTime>>,
	sleeps: Arc<Mutex<Vec<Duration>>>,
}
impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self { now: Arc::new(Mutex::new(start)), sleeps: Default::default() }
	}

	/// Moves the clock forward by `delta`.
	pub fn advance(&self, delta: Duration) {
		*self.now.lock() += delta;
	}

	/// Jumps the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.now.lock() = instant;
	}

	/// Durations of every sleep performed so far.
	pub fn sleeps(&self) -> Vec<Duration> {
		self.sleeps.lock().clone()
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.now.lock()
	}

	fn sleep_until(&self, deadline: OffsetDateTime) -> SleepFuture<'_> {
		let mut now = self.now.lock();
		let remaining = deadline - *now;

		if remaining.is_positive() {
			*now = deadline;
		}

		self.sleeps.lock().push(remaining.max(Duration::ZERO));

		Box::pin(async {})
	}
}
