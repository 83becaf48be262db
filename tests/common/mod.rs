//! Shared test infrastructure for button-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use button_sequencer::{ButtonInput, Duration, IndicatorBank, Instant, TimeSource};

// ============================================================================
// Mock Button
// ============================================================================

/// Button whose raw level is controlled through a shared cell
pub struct MockButton<'a> {
    level: &'a Cell<bool>,
}

impl<'a> MockButton<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl ButtonInput for MockButton<'_> {
    fn is_pressed(&mut self) -> bool {
        self.level.get()
    }
}

// ============================================================================
// Mock Indicators
// ============================================================================

pub const MOCK_INDICATORS: usize = 3;

/// Indicator bank that records its state and every write
pub struct MockIndicators {
    states: [bool; MOCK_INDICATORS],
    history: heapless::Vec<(usize, bool), 256>,
}

impl MockIndicators {
    pub fn new() -> Self {
        Self {
            states: [false; MOCK_INDICATORS],
            history: heapless::Vec::new(),
        }
    }

    /// Index of the single output that is on, if exactly one is
    pub fn lit(&self) -> Option<usize> {
        let mut on = self.states.iter().enumerate().filter(|(_, on)| **on);
        match (on.next(), on.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }

    pub fn states(&self) -> &[bool] {
        &self.states
    }

    pub fn history(&self) -> &[(usize, bool)] {
        &self.history
    }

    /// Number of writes that switched an output on
    pub fn on_writes(&self) -> usize {
        self.history.iter().filter(|(_, on)| *on).count()
    }
}

impl IndicatorBank for MockIndicators {
    fn count(&self) -> usize {
        MOCK_INDICATORS
    }

    fn set(&mut self, index: usize, on: bool) {
        assert!(index < MOCK_INDICATORS, "write to missing output {}", index);
        self.states[index] = on;
        let _ = self.history.push((index, on));
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(0),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u32) {
        self.current_time
            .set(self.current_time.get().wrapping_add(millis));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(millis);
    }

    pub fn millis(&self) -> u32 {
        self.current_time.get()
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Instant {
        Instant::from_millis(self.current_time.get())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn ms(millis: u32) -> Duration {
    Duration::from_millis(millis)
}

pub fn at(millis: u32) -> Instant {
    Instant::from_millis(millis)
}
