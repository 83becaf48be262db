//! Single/double press classification on top of a debounced button.

use crate::config::Timing;
use crate::debounce::{ButtonInput, DebouncedButton, TransitionStamp};
use crate::time::{Duration, Instant, TimeSource};

/// Discrete button gesture produced at most once per polling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    /// Nothing to report this tick.
    #[default]
    None,
    /// One release followed by silence for longer than the double-press timeout.
    Single,
    /// Two releases, the second arriving while the first was still pending.
    Double,
}

/// Classifies a debounced button level stream into [`PressEvent`]s.
///
/// A release arms a pending double press. A second release while armed
/// yields `Double`; staying released past the timeout yields `Single`.
/// Pure state machine: the caller supplies the level and the time.
#[derive(Debug, Clone)]
pub struct PressClassifier {
    double_press_timeout: Duration,
    button_down: bool,
    down_at: Instant,
    up_at: Instant,
    double_pending: bool,
}

impl PressClassifier {
    pub fn new(double_press_timeout: Duration) -> Self {
        Self {
            double_press_timeout,
            button_down: false,
            down_at: Instant::default(),
            up_at: Instant::default(),
            double_pending: false,
        }
    }

    /// Feeds one debounced sample and returns the event for this tick.
    pub fn update(&mut self, pressed: bool, now: Instant) -> PressEvent {
        let mut event = PressEvent::None;

        if pressed != self.button_down {
            self.button_down = pressed;
            if pressed {
                self.down_at = now;
            } else {
                self.up_at = now;
                if self.double_pending {
                    self.double_pending = false;
                    event = PressEvent::Double;
                } else {
                    self.double_pending = true;
                }
            }
        }

        // A release this tick sets up_at = now, so this can't fire on the same tick
        if !self.button_down
            && self.double_pending
            && now.duration_since(self.up_at) > self.double_press_timeout
        {
            self.double_pending = false;
            event = PressEvent::Single;
        }

        event
    }

    /// Returns true while the classifier believes the button is held.
    pub fn is_down(&self) -> bool {
        self.button_down
    }

    /// Returns true while a first click waits for a possible second one.
    pub fn is_double_pending(&self) -> bool {
        self.double_pending
    }

    /// Returns when the button was last pressed.
    pub fn last_press(&self) -> Instant {
        self.down_at
    }

    /// Returns when the button was last released.
    pub fn last_release(&self) -> Instant {
        self.up_at
    }
}

/// A debounced button and press classifier polled together.
///
/// Call [`ButtonEvents::next_event`] once per polling tick.
pub struct ButtonEvents<'a, P: ButtonInput, T: TimeSource> {
    button: DebouncedButton<'a, P, T>,
    classifier: PressClassifier,
    time_source: &'a T,
}

impl<'a, P: ButtonInput, T: TimeSource> ButtonEvents<'a, P, T> {
    pub fn new(pin: P, time_source: &'a T, stamp: &'a TransitionStamp, timing: Timing) -> Self {
        Self {
            button: DebouncedButton::new(pin, time_source, stamp, timing.debounce),
            classifier: PressClassifier::new(timing.double_press_timeout),
            time_source,
        }
    }

    /// Samples the button once and returns this tick's event.
    pub fn next_event(&mut self) -> PressEvent {
        let now = self.time_source.now();
        let pressed = self.button.sample(now);
        let event = self.classifier.update(pressed, now);

        if event != PressEvent::None {
            debug!("button event: {}", event);
        }

        event
    }

    /// Returns the underlying debounced button.
    pub fn button(&self) -> &DebouncedButton<'a, P, T> {
        &self.button
    }

    /// Returns the underlying classifier.
    pub fn classifier(&self) -> &PressClassifier {
        &self.classifier
    }
}
