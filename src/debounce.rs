//! Time-window debouncing for a single mechanical button.
//!
//! A raw transition is accepted only when more than the debounce window has
//! passed since the last accepted transition. The timestamp of that last
//! transition lives in a [`TransitionStamp`], which an edge interrupt may
//! also refresh to stretch the quiet period while the contacts bounce.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::time::{Duration, Instant, TimeSource};

/// Trait for abstracting the button's digital input.
///
/// Implementations handle the electrical polarity (active-low switches are
/// the common case) and report `true` while the button is held down. Reads
/// are expected to be instantaneous and cannot fail.
pub trait ButtonInput {
    /// Returns the instantaneous, undebounced button level.
    fn is_pressed(&mut self) -> bool;
}

/// Timestamp of the last accepted button transition.
///
/// A single atomic word, so it can live in a `static` shared with the edge
/// interrupt. Each side only ever performs a whole-word load or store.
#[derive(Debug)]
pub struct TransitionStamp(AtomicU32);

impl TransitionStamp {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Records `now` as the most recent transition.
    ///
    /// Safe to call from interrupt context.
    #[inline]
    pub fn mark(&self, now: Instant) {
        self.0.store(now.as_millis(), Ordering::Release);
    }

    /// Returns the most recent transition time.
    #[inline]
    pub fn get(&self) -> Instant {
        Instant::from_millis(self.0.load(Ordering::Acquire))
    }
}

impl Default for TransitionStamp {
    fn default() -> Self {
        Self::new()
    }
}

/// A button input with its transitions debounced in time.
///
/// # Type Parameters
/// * `'a` - Lifetime of the time source and transition stamp references
/// * `P` - Button input implementation type
/// * `T` - Time source implementation type
pub struct DebouncedButton<'a, P: ButtonInput, T: TimeSource> {
    pin: P,
    time_source: &'a T,
    stamp: &'a TransitionStamp,
    debounce: Duration,
    state: bool,
}

impl<'a, P: ButtonInput, T: TimeSource> DebouncedButton<'a, P, T> {
    /// Creates a debounced button that starts in the released state.
    pub fn new(pin: P, time_source: &'a T, stamp: &'a TransitionStamp, debounce: Duration) -> Self {
        Self {
            pin,
            time_source,
            stamp,
            debounce,
            state: false,
        }
    }

    /// Returns the debounced state, sampling the pin at the current time.
    pub fn state(&mut self) -> bool {
        let now = self.time_source.now();
        self.sample(now)
    }

    /// Returns the debounced state as of `now`.
    ///
    /// The pin is only consulted once the debounce window since the last
    /// accepted transition has elapsed. A differing level is then accepted
    /// and `now` becomes the new transition time.
    ///
    /// A stamp up to one window later than `now` means the edge interrupt
    /// fired after `now` was read, and counts as a fresh transition.
    pub fn sample(&mut self, now: Instant) -> bool {
        let last = self.stamp.get();
        let marked_after_now = last.duration_since(now) <= self.debounce;

        if !marked_after_now && now.duration_since(last) > self.debounce {
            let raw = self.pin.is_pressed();
            if raw != self.state {
                self.state = raw;
                self.stamp.mark(now);
                trace!("button level accepted: {}", raw);
            }
        }

        self.state
    }

    /// Returns the last debounced state without sampling.
    pub fn last_state(&self) -> bool {
        self.state
    }

    /// Returns the transition stamp shared with the edge interrupt.
    pub fn stamp(&self) -> &'a TransitionStamp {
        self.stamp
    }
}
