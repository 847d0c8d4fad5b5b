//! Brain time model.
//!
//! # Design
//!
//! The host drives every brain with a per-frame delta in seconds.  Two
//! things are derived from that stream:
//!
//! - [`BrainClock`] counts frames (`Tick`) and accumulated seconds; telemetry
//!   stamps records with both.
//! - [`Timer`] is a plain accumulator compared against an interval.  Timers
//!   are not scheduled callbacks: the brain adds the frame delta, checks
//!   [`Timer::is_due`], and resets the timer when it acts on it.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A frame counter: the number of `Brain::tick` calls made so far.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` frames after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── BrainClock ────────────────────────────────────────────────────────────────

/// Frame count and elapsed time of one brain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrainClock {
    /// Frames processed so far.
    pub frame: Tick,
    /// Sum of all deltas passed to [`advance`](Self::advance), in seconds.
    pub elapsed_secs: f64,
}

impl BrainClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `delta_secs`.  Negative deltas count as zero.
    #[inline]
    pub fn advance(&mut self, delta_secs: f32) {
        self.frame = self.frame.offset(1);
        self.elapsed_secs += f64::from(delta_secs.max(0.0));
    }
}

impl fmt::Display for BrainClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.frame, self.elapsed_secs)
    }
}

// ── Timer ─────────────────────────────────────────────────────────────────────

/// Accumulating interval timer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    /// Seconds accumulated since the last reset.
    pub elapsed: f32,
    /// Seconds that must accumulate before the timer is due.
    pub interval: f32,
}

impl Timer {
    pub fn new(interval: f32) -> Self {
        Self { elapsed: 0.0, interval }
    }

    /// Add `delta_secs` (negative deltas count as zero).
    #[inline]
    pub fn accumulate(&mut self, delta_secs: f32) {
        self.elapsed += delta_secs.max(0.0);
    }

    /// `true` once at least `interval` seconds have accumulated.
    #[inline]
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.interval
    }

    #[inline]
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Seconds left until the timer is due (zero when already due).
    #[inline]
    pub fn remaining(&self) -> f32 {
        (self.interval - self.elapsed).max(0.0)
    }
}
