//! Play/edit mode control for the indicator display.
//!
//! Provides [`ModeController`], which owns the default and user sequences,
//! reacts to [`PressEvent`]s and steps the indicators on a fixed interval.
//! Mode changes go through the pure [`transition`] function so they can be
//! exercised without hardware. Also defines the [`IndicatorBank`] trait for
//! the output side.

use crate::config::Timing;
use crate::press::PressEvent;
use crate::sequence::{RotatingSequence, SequenceError};
use crate::time::{Duration, Instant, TimeSource};

/// Trait for abstracting a bank of on/off indicator outputs.
///
/// Implement this for your board's LEDs (GPIO pins, a shift register, etc.).
/// Writes cannot fail; handle hardware errors internally.
pub trait IndicatorBank {
    /// Number of outputs in the bank.
    fn count(&self) -> usize;

    /// Switches output `index` on or off. `index` is always `< count()`.
    fn set(&mut self, index: usize, on: bool);

    /// Switches every output off.
    fn all_off(&mut self) {
        for index in 0..self.count() {
            self.set(index, false);
        }
    }
}

/// Display mode of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Playing the built-in pattern; nothing recorded yet.
    PlayingDefault,
    /// Recording presses into the user sequence while the default pattern plays.
    Editing,
    /// Playing the recorded user sequence.
    PlayingUser,
}

/// Side effect requested by a mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Start a fresh recording.
    BeginEdit,
    /// Append the currently lit index to the recording.
    Record,
    /// Close the recording into the user sequence and play it.
    CommitEdit,
}

/// Computes the next mode and side effect for an event.
///
/// | From                         | Event    | To            | Effect       |
/// |------------------------------|----------|---------------|--------------|
/// | `PlayingDefault`/`PlayingUser` | `Double` | `Editing`   | `BeginEdit`  |
/// | `Editing`                    | `Single` | `Editing`     | `Record`     |
/// | `Editing`                    | `Double` | `PlayingUser` | `CommitEdit` |
///
/// Everything else leaves the mode unchanged. `CommitEdit` assumes something
/// was recorded; when nothing was, [`ModeController`] keeps the previous user
/// sequence, or `PlayingDefault` if there has never been one.
pub fn transition(mode: Mode, event: PressEvent) -> (Mode, Effect) {
    match (mode, event) {
        (Mode::PlayingDefault | Mode::PlayingUser, PressEvent::Double) => {
            (Mode::Editing, Effect::BeginEdit)
        }
        (Mode::Editing, PressEvent::Single) => (Mode::Editing, Effect::Record),
        (Mode::Editing, PressEvent::Double) => (Mode::PlayingUser, Effect::CommitEdit),
        (mode, _) => (mode, Effect::None),
    }
}

/// Drives an indicator bank from a default and a user-recorded sequence.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `O` - Indicator bank implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of values in either sequence
pub struct ModeController<'t, O: IndicatorBank, T: TimeSource, const N: usize> {
    outputs: O,
    time_source: &'t T,
    mode: Mode,
    default_sequence: RotatingSequence<N>,
    user_sequence: RotatingSequence<N>,
    recording: RotatingSequence<N>,
    has_user_sequence: bool,
    current_index: u8,
    last_change: Instant,
    colour_change: Duration,
}

impl<'t, O: IndicatorBank, T: TimeSource, const N: usize> ModeController<'t, O, T, N> {
    /// Creates a controller playing `default_pattern`, with all outputs off.
    ///
    /// # Errors
    /// * `EmptySequence` - `default_pattern` is empty
    /// * `CapacityExceeded` - `default_pattern` holds more than `N` values
    pub fn new(
        mut outputs: O,
        time_source: &'t T,
        default_pattern: &[u8],
        timing: Timing,
    ) -> Result<Self, SequenceError> {
        let default_sequence = RotatingSequence::cycle(default_pattern)?;
        outputs.all_off();

        Ok(Self {
            outputs,
            time_source,
            mode: Mode::PlayingDefault,
            default_sequence,
            user_sequence: RotatingSequence::new(),
            recording: RotatingSequence::new(),
            has_user_sequence: false,
            current_index: 0,
            last_change: time_source.now(),
            colour_change: timing.colour_change,
        })
    }

    /// Applies a press event and returns the effect that was carried out.
    ///
    /// Leaving edit mode with nothing recorded returns `Effect::None`: the
    /// previous user sequence keeps playing, or the default one if no
    /// sequence has ever been committed.
    pub fn handle_event(&mut self, event: PressEvent) -> Effect {
        let (mut next, mut effect) = transition(self.mode, event);

        match effect {
            Effect::None => {}
            Effect::BeginEdit => {
                self.recording = RotatingSequence::new();
                info!("editing started");
            }
            Effect::Record => match self.recording.add_pending(self.current_index) {
                Ok(()) => debug!("recorded index {}", self.current_index),
                Err(e) => warn!("index {} not recorded: {}", self.current_index, e),
            },
            Effect::CommitEdit => {
                if self.recording.close() {
                    self.user_sequence =
                        core::mem::replace(&mut self.recording, RotatingSequence::new());
                    self.has_user_sequence = true;
                    info!("user sequence of {} steps committed", self.user_sequence.len());
                } else {
                    effect = Effect::None;
                    if self.has_user_sequence {
                        warn!("nothing recorded, keeping previous user sequence");
                    } else {
                        warn!("nothing recorded, keeping default sequence");
                        next = Mode::PlayingDefault;
                    }
                }
            }
        }

        self.mode = next;
        effect
    }

    /// Steps the display once the change interval has elapsed.
    ///
    /// Switches all outputs off, lights the active sequence's current value
    /// and advances the sequence. Returns the lit index, or `None` if no step
    /// was due or the value has no matching output.
    pub fn service(&mut self) -> Option<u8> {
        let now = self.time_source.now();
        if now.duration_since(self.last_change) <= self.colour_change {
            return None;
        }

        self.outputs.all_off();

        let mut lit = None;
        if let Some(value) = self.active_sequence().current() {
            self.current_index = value;
            if usize::from(value) < self.outputs.count() {
                self.outputs.set(usize::from(value), true);
                lit = Some(value);
            } else {
                warn!("index {} has no output", value);
            }
        }

        self.active_sequence_mut().advance();
        self.last_change = now;
        lit
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns true while presses are being recorded.
    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// Returns true once a recorded sequence has been committed. Stays true.
    pub fn has_user_sequence(&self) -> bool {
        self.has_user_sequence
    }

    /// Returns the value most recently shown on the display.
    pub fn current_index(&self) -> u8 {
        self.current_index
    }

    /// Returns the sequence currently driving the display.
    ///
    /// The default sequence keeps playing while editing, as a reference for
    /// which index a press will record.
    pub fn active_sequence(&self) -> &RotatingSequence<N> {
        match self.mode {
            Mode::PlayingUser => &self.user_sequence,
            Mode::PlayingDefault | Mode::Editing => &self.default_sequence,
        }
    }

    fn active_sequence_mut(&mut self) -> &mut RotatingSequence<N> {
        match self.mode {
            Mode::PlayingUser => &mut self.user_sequence,
            Mode::PlayingDefault | Mode::Editing => &mut self.default_sequence,
        }
    }

    /// Returns the built-in sequence.
    pub fn default_sequence(&self) -> &RotatingSequence<N> {
        &self.default_sequence
    }

    /// Returns the last committed user sequence, empty and open until the
    /// first commit.
    pub fn user_sequence(&self) -> &RotatingSequence<N> {
        &self.user_sequence
    }

    /// Returns the values recorded in the current edit session.
    pub fn recording(&self) -> &RotatingSequence<N> {
        &self.recording
    }

    /// Returns a reference to the indicator bank.
    pub fn outputs(&self) -> &O {
        &self.outputs
    }
}
