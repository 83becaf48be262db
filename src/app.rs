//! The polling-loop body tying the button to the display.

use crate::config::Timing;
use crate::controller::{Effect, IndicatorBank, Mode, ModeController};
use crate::debounce::{ButtonInput, TransitionStamp};
use crate::press::{ButtonEvents, PressEvent};
use crate::sequence::SequenceError;
use crate::time::TimeSource;

/// What happened during one call to [`SequencerApp::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    /// Button event classified this tick.
    pub event: PressEvent,
    /// Effect the event had on the controller.
    pub effect: Effect,
    /// Index lit by a display step, if one happened.
    pub lit: Option<u8>,
}

/// Button pipeline and mode controller driven by one polling loop.
///
/// The board calls [`poll`](Self::poll) every
/// [`POLL_INTERVAL_MS`](crate::config::POLL_INTERVAL_MS) and registers
/// [`TransitionStamp::mark`] on the button's edge interrupt.
pub struct SequencerApp<'a, P, O, T, const N: usize>
where
    P: ButtonInput,
    O: IndicatorBank,
    T: TimeSource,
{
    events: ButtonEvents<'a, P, T>,
    controller: ModeController<'a, O, T, N>,
}

impl<'a, P, O, T, const N: usize> SequencerApp<'a, P, O, T, N>
where
    P: ButtonInput,
    O: IndicatorBank,
    T: TimeSource,
{
    pub fn new(
        button: P,
        outputs: O,
        time_source: &'a T,
        stamp: &'a TransitionStamp,
        default_pattern: &[u8],
        timing: Timing,
    ) -> Result<Self, SequenceError> {
        Ok(Self {
            events: ButtonEvents::new(button, time_source, stamp, timing),
            controller: ModeController::new(outputs, time_source, default_pattern, timing)?,
        })
    }

    /// Runs one tick: classify the button, apply the event, step the display.
    pub fn poll(&mut self) -> PollReport {
        let event = self.events.next_event();
        let effect = self.controller.handle_event(event);
        let lit = self.controller.service();

        PollReport { event, effect, lit }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &ModeController<'a, O, T, N> {
        &self.controller
    }

    pub fn events(&self) -> &ButtonEvents<'a, P, T> {
        &self.events
    }
}
