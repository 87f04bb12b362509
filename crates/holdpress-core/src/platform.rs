//! Platform abstraction traits for holdpress timing services.
//!
//! Hosts drive the [`TimerRuntime`](crate::TimerRuntime) with their own
//! notion of time. Tests advance a manual timeline; real applications read
//! a monotonic clock such as [`StdClock`].

/// Provides timing information for the runtime.
pub trait Clock {
    /// Instant type produced by this clock implementation.
    type Instant: Copy;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Monotonic clock backed by `web_time::Instant`, which maps to
/// `std::time::Instant` on native targets and `performance.now()` on the web.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdClock;

impl StdClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for StdClock {
    type Instant = web_time::Instant;

    fn now(&self) -> Self::Instant {
        web_time::Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}
