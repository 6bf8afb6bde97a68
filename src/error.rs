use thiserror::Error;

use crate::Position;

/// Error returned by the operations of a [`Buffer`](crate::Buffer).
///
/// A rejected operation never mutates the buffer, so it stays usable after any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The append would overwrite a slot that has not been dropped yet.
    /// Drop older positions and retry.
    #[error("buffer overflow")]
    Overflow,

    /// The position is outside the range the buffer can currently answer for.
    /// `bottom` and `upper` are the queryable bounds at the time of the call.
    #[error("out of range: {position} not in range [{bottom}, {upper})")]
    OutOfRange {
        position: Position,
        bottom: Position,
        upper: Position,
    },
}

impl Error {
    pub(crate) const fn out_of_range(position: Position, bottom: Position, upper: Position) -> Self {
        Self::OutOfRange {
            position,
            bottom,
            upper,
        }
    }

    /// Returns `true` for [`Error::Overflow`].
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow)
    }

    /// Returns `true` for [`Error::OutOfRange`].
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Error returned when a buffer is constructed with a capacity it cannot address.
///
/// Capacity must be at least 1 and no larger than [`MAX_CAPACITY`](crate::MAX_CAPACITY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid capacity {capacity}: must be in 1..={max}", max = crate::MAX_CAPACITY)]
pub struct CapacityError {
    capacity: usize,
}

impl CapacityError {
    pub(crate) const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// The rejected capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
