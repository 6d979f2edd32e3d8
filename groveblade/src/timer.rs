//! Simulation time and cooldown gates.
//!
//! Nothing in the simulation reads a wall clock. The owning loop advances a
//! [`Clock`] once per tick and hands `clock.now()` to every cooldown check, so
//! expiry is observed with tick granularity and replays are deterministic.

use std::time::Duration;

/// Fixed-step simulation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    elapsed: Duration,
    fixed_delta: Duration,
    ticks: u64,
}

impl Clock {
    /// 60 ticks per second.
    pub const DEFAULT_TICK: Duration = Duration::from_nanos(16_666_667);

    pub fn new() -> Self {
        Self::with_tick(Self::DEFAULT_TICK)
    }

    pub fn with_tick(fixed_delta: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            fixed_delta,
            ticks: 0,
        }
    }

    /// Advance by one fixed tick and return the new time.
    pub fn advance(&mut self) -> Duration {
        self.elapsed += self.fixed_delta;
        self.ticks += 1;
        self.elapsed
    }

    /// Time since the level started.
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Time gate that reopens once more than `duration` has passed since it was
/// last stamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooldown {
    duration: Duration,
    stamped_at: Option<Duration>,
}

impl Cooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            stamped_at: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Record `now` as the start of the window.
    pub fn stamp(&mut self, now: Duration) {
        self.stamped_at = Some(now);
    }

    /// True when the gate was never stamped or strictly more than `duration`
    /// has elapsed since the last stamp.
    pub fn has_elapsed(&self, now: Duration) -> bool {
        match self.stamped_at {
            Some(start) => now.saturating_sub(start) > self.duration,
            None => true,
        }
    }
}
