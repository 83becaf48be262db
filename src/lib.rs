#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DebouncedButton`**: Stabilizes a raw button input using a time window since the last accepted transition
//! - **`TransitionStamp`**: Lock-free timestamp shared with the button's edge interrupt
//! - **`PressClassifier`**: Turns the debounced level into `Single` and `Double` press events
//! - **`ButtonEvents`**: Debouncer and classifier sampled together once per polling tick
//! - **`RotatingSequence`**: A list authored while open, then replayed as an endless cycle once closed
//! - **`ModeController`**: Plays the default or user sequence on the indicators and records presses while editing
//! - **`SequencerApp`**: One polling-loop tick: button, mode, display
//! - **`ButtonInput`** / **`IndicatorBank`**: Traits to implement for your button pin and LEDs
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`TemperaturePoller`**: LM75 sampling with a bounded history and an over-temperature alert
//!
//! All timing is in milliseconds on a wrapping 32-bit counter.

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod lm75;
pub mod press;
pub mod sequence;
pub mod time;

pub use app::{PollReport, SequencerApp};
pub use config::Timing;
pub use controller::{Effect, IndicatorBank, Mode, ModeController, transition};
pub use debounce::{ButtonInput, DebouncedButton, TransitionStamp};
pub use lm75::{AlertFlag, Lm75, PollOutcome, SensorError, TemperatureLog, TemperaturePoller};
pub use press::{ButtonEvents, PressClassifier, PressEvent};
pub use sequence::{RotatingSequence, SequenceError};
pub use time::{Duration, Instant, TimeSource};
