//! Timing windows and board defaults.

use crate::time::Duration;

/// A raw button transition is accepted only after this much stable time.
pub const DEBOUNCE_MS: u32 = 35;

/// Two releases closer than this are a double press.
pub const DOUBLE_PRESS_TIMEOUT_MS: u32 = 300;

/// How long each sequence value stays lit.
pub const COLOUR_CHANGE_MS: u32 = 1000;

/// Cadence of the main polling loop.
pub const POLL_INTERVAL_MS: u32 = 10;

/// Number of indicator outputs on the board.
pub const INDICATOR_COUNT: usize = 3;

/// Pattern played before any user sequence has been recorded.
pub const DEFAULT_PATTERN: [u8; INDICATOR_COUNT] = [0, 1, 2];

/// Maximum number of presses recorded in one edit session.
pub const USER_SEQUENCE_CAPACITY: usize = 32;

// LM75 thermostat defaults
pub const LM75_ADDRESS: u8 = 0x48; // 7-bit; 0x90 in 8-bit write notation
pub const DEFAULT_OVER_TEMP_C: f32 = 28.0; // TOS
pub const DEFAULT_HYSTERESIS_C: f32 = 26.0; // THYST
pub const TEMPERATURE_HISTORY_LEN: usize = 60;

/// Timing windows used by the button pipeline and the display.
///
/// `Default` gives the board constants above; the `with_*` setters let a
/// board retune individual windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Minimum time between accepted button transitions.
    pub debounce: Duration,

    /// Window after a release in which a second release counts as a double press.
    pub double_press_timeout: Duration,

    /// Interval between display steps.
    pub colour_change: Duration,
}

impl Timing {
    pub const fn new() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            double_press_timeout: Duration::from_millis(DOUBLE_PRESS_TIMEOUT_MS),
            colour_change: Duration::from_millis(COLOUR_CHANGE_MS),
        }
    }

    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub const fn with_double_press_timeout(mut self, timeout: Duration) -> Self {
        self.double_press_timeout = timeout;
        self
    }

    pub const fn with_colour_change(mut self, interval: Duration) -> Self {
        self.colour_change = interval;
        self
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}
