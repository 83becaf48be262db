//! Millisecond time abstraction for platform-agnostic timing.
//!
//! Boards usually keep a 32-bit millisecond counter driven by SysTick or a
//! hardware timer. [`Instant`] wraps that counter and compares with wrapping
//! arithmetic, so elapsed times stay correct across the ~49.7 day rollover.

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current time instant. Must be non-decreasing (modulo wrap).
    fn now(&self) -> Instant;
}

/// A span of time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Duration(u32);

impl Duration {
    /// Creates duration from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u32) -> Self {
        Duration(millis)
    }

    /// Converts duration to milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> u32 {
        self.0
    }
}

/// A point in time, in milliseconds since an arbitrary epoch (usually boot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u32);

impl Instant {
    /// Creates an instant from a raw millisecond counter value.
    #[inline]
    pub const fn from_millis(millis: u32) -> Self {
        Instant(millis)
    }

    /// Returns the raw millisecond counter value.
    #[inline]
    pub const fn as_millis(&self) -> u32 {
        self.0
    }

    /// Calculates duration since an earlier instant.
    ///
    /// Uses wrapping subtraction, so the result is correct as long as the two
    /// instants are less than `u32::MAX` milliseconds apart.
    #[inline]
    pub fn duration_since(&self, earlier: Self) -> Duration {
        Duration(self.0.wrapping_sub(earlier.0))
    }
}
