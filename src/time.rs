//! Fixed-interval tick scheduling.
//!
//! The emitter is stepped with a constant `dt` on a wall-clock timer rather
//! than with the measured frame delta. [`FrameClock`] tracks when ticks are
//! due so the event loop can sleep until the next one.
//!
//! # Example
//!
//! ```ignore
//! use sparks::time::FrameClock;
//!
//! let mut clock = FrameClock::from_millis(16)?;
//!
//! // In your event loop:
//! for _ in 0..clock.poll() {
//!     emitter.update(0.01);
//! }
//! event_loop.set_control_flow(ControlFlow::WaitUntil(clock.next_deadline()));
//! ```

use std::time::{Duration, Instant};

use crate::error::{ConfigError, Result};

/// Timer that reports how many fixed ticks have elapsed.
#[derive(Debug)]
pub struct FrameClock {
    /// Time between ticks.
    interval: Duration,
    /// When the last tick was accounted for.
    last: Instant,
    /// Time elapsed past `last` that has not become a tick yet.
    accumulator: Duration,
    /// Total ticks handed out.
    tick_count: u64,
    /// Most ticks returned by one call; the rest are dropped.
    max_catch_up: u32,
    paused: bool,
}

impl FrameClock {
    /// Clock with the given tick interval, starting now.
    pub fn new(interval: Duration) -> Result<Self> {
        Self::starting_at(interval, Instant::now())
    }

    pub fn from_millis(millis: u64) -> Result<Self> {
        Self::new(Duration::from_millis(millis))
    }

    /// Clock whose first interval starts at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTickInterval`] if `interval` is zero.
    pub fn starting_at(interval: Duration, start: Instant) -> Result<Self> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(Self {
            interval,
            last: start,
            accumulator: Duration::ZERO,
            tick_count: 0,
            max_catch_up: 1,
            paused: false,
        })
    }

    /// Allow up to `max` ticks per poll after a stall.
    ///
    /// The default of 1 behaves like a repeating timer: a late frame fires
    /// once and the missed ticks are skipped.
    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    /// Number of ticks due at `now`.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            due += 1;
        }

        if due > self.max_catch_up {
            due = self.max_catch_up;
        }
        self.tick_count += u64::from(due);
        due
    }

    /// Number of ticks due now.
    pub fn poll(&mut self) -> u32 {
        self.advance(Instant::now())
    }

    /// When the next tick becomes due.
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval.saturating_sub(self.accumulator)
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks returned so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop producing ticks. Time spent paused is discarded.
    pub fn pause(&mut self) {
        self.paused = true;
        self.accumulator = Duration::ZERO;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}
