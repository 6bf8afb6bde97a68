use crate::{CapacityError, Position, RingBuf, SyncBuf, MAX_CAPACITY};

/// Construction parameters for a [`RingBuf`].
///
/// # Examples
/// ```
/// # use logical_ring::{Buffer, Config};
/// let mut buf = Config::default().capacity(2).start(-1).build().unwrap();
/// buf.append("x").unwrap();
/// assert_eq!(buf.frontier(), 0);
///
/// assert!(Config::default().capacity(0).build::<u8>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots.
    pub capacity: usize,
    /// Position assigned to the first appended item.
    pub start: Position,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            start: 0,
        }
    }
}

impl Config {
    /// Sets the number of slots.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the position assigned to the first appended item.
    pub fn start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    /// Checks that the capacity can be addressed by [`Position`].
    pub fn validate(&self) -> Result<(), CapacityError> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            Err(CapacityError::new(self.capacity))
        } else {
            Ok(())
        }
    }

    /// Builds a ring buffer, failing if the capacity is out of range.
    pub fn build<A: Clone + Default>(&self) -> Result<RingBuf<A>, CapacityError> {
        RingBuf::try_starting_at(self.capacity, self.start)
    }

    /// Builds a ring buffer already wrapped in a [`SyncBuf`].
    pub fn build_sync<A: Clone + Default>(&self) -> Result<SyncBuf<RingBuf<A>>, CapacityError> {
        self.build().map(SyncBuf::new)
    }
}
