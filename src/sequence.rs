//! Rotating playback sequences.
//!
//! A [`RotatingSequence`] is authored while open, then closed into an endless
//! cycle. The cycle is stored as a fixed-capacity array with a cursor that
//! wraps back to the start, so advancing is O(1) and playback never ends.

use heapless::Vec;

/// Sequence construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Values can only be appended while the sequence is open.
    Closed,

    /// No values provided.
    EmptySequence,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::Closed => {
                write!(f, "sequence is closed and can no longer be extended")
            }
            SequenceError::EmptySequence => {
                write!(f, "sequence must have at least one value")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}

#[derive(Debug, Clone)]
enum Stage<const N: usize> {
    Open { pending: Vec<u8, N> },
    Closed { cycle: Vec<u8, N>, cursor: usize },
}

/// A sequence of small values that is built once and then replayed forever.
///
/// Starts open: values are appended with [`add_pending`](Self::add_pending).
/// [`close`](Self::close) turns a non-empty pending list into a cycle in
/// insertion order; from then on [`current`](Self::current) and
/// [`advance`](Self::advance) walk it endlessly. Closing is one-way.
///
/// # Type Parameters
/// * `N` - Maximum number of values this sequence can hold
#[derive(Debug, Clone)]
pub struct RotatingSequence<const N: usize> {
    stage: Stage<N>,
}

impl<const N: usize> RotatingSequence<N> {
    /// Creates an empty, open sequence.
    pub const fn new() -> Self {
        Self {
            stage: Stage::Open { pending: Vec::new() },
        }
    }

    /// Creates an already-closed sequence cycling through `values`.
    ///
    /// # Errors
    /// * `EmptySequence` - `values` is empty
    /// * `CapacityExceeded` - `values` holds more than `N` entries
    pub fn cycle(values: &[u8]) -> Result<Self, SequenceError> {
        if values.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        let cycle = Vec::from_slice(values).map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(Self {
            stage: Stage::Closed { cycle, cursor: 0 },
        })
    }

    /// Appends a value to the pending list.
    ///
    /// # Errors
    /// * `Closed` - the sequence has already been closed
    /// * `CapacityExceeded` - the pending list is full
    pub fn add_pending(&mut self, value: u8) -> Result<(), SequenceError> {
        match &mut self.stage {
            Stage::Open { pending } => pending
                .push(value)
                .map_err(|_| SequenceError::CapacityExceeded),
            Stage::Closed { .. } => Err(SequenceError::Closed),
        }
    }

    /// Closes the pending list into a cycle.
    ///
    /// Closing an empty open sequence does nothing: it stays open and has no
    /// current value. Returns true if the sequence is closed afterwards.
    pub fn close(&mut self) -> bool {
        if let Stage::Open { pending } = &mut self.stage {
            if pending.is_empty() {
                return false;
            }

            let cycle = core::mem::replace(pending, Vec::new());
            self.stage = Stage::Closed { cycle, cursor: 0 };
        }

        true
    }

    /// Returns the value at the current position, or `None` if not closed.
    pub fn current(&self) -> Option<u8> {
        match &self.stage {
            Stage::Closed { cycle, cursor } => cycle.get(*cursor).copied(),
            Stage::Open { .. } => None,
        }
    }

    /// Moves to the next value, wrapping after the last. No-op if not closed.
    pub fn advance(&mut self) {
        if let Stage::Closed { cycle, cursor } = &mut self.stage {
            *cursor = (*cursor + 1) % cycle.len();
        }
    }

    /// Returns true once the sequence has been closed into a cycle.
    pub fn is_closed(&self) -> bool {
        matches!(self.stage, Stage::Closed { .. })
    }

    /// Number of values, pending or in the cycle.
    pub fn len(&self) -> usize {
        match &self.stage {
            Stage::Open { pending } => pending.len(),
            Stage::Closed { cycle, .. } => cycle.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values appended so far. Empty once closed.
    pub fn pending(&self) -> &[u8] {
        match &self.stage {
            Stage::Open { pending } => pending.as_slice(),
            Stage::Closed { .. } => &[],
        }
    }

    /// Values in cycle order starting from the first one added. Empty while open.
    pub fn values(&self) -> &[u8] {
        match &self.stage {
            Stage::Closed { cycle, .. } => cycle.as_slice(),
            Stage::Open { .. } => &[],
        }
    }

    /// Index of the current position within [`values`](Self::values).
    pub fn position(&self) -> Option<usize> {
        match &self.stage {
            Stage::Closed { cursor, .. } => Some(*cursor),
            Stage::Open { .. } => None,
        }
    }
}

impl<const N: usize> Default for RotatingSequence<N> {
    fn default() -> Self {
        Self::new()
    }
}
