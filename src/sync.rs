use parking_lot::RwLock;
use tracing::trace;

use crate::{Buffer, Error, Iter, Position};

/// Wraps a [`Buffer`] so it can be shared between threads.
///
/// [`append`](Self::append) and [`drop_until`](Self::drop_until) take an exclusive lock,
/// while [`to_vec`](Self::to_vec) and [`iter`](Self::iter) share a read lock. Every read
/// returns data copied out of the wrapped buffer before the lock is released, so results
/// stay valid no matter what is appended afterwards.
///
/// # Examples
/// ```
/// # use logical_ring::{RingBuf, SyncBuf};
/// let buf = SyncBuf::new(RingBuf::new(8));
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         for i in 0..4 {
///             buf.append(i).unwrap();
///         }
///     });
/// });
/// let iter = buf.iter(0).unwrap();
/// buf.drop_until(3).unwrap();
/// assert_eq!(iter.into_vec(), [0, 1, 2, 3]);
/// ```
#[derive(Debug, Default)]
pub struct SyncBuf<B> {
    inner: RwLock<B>,
}

impl<B> SyncBuf<B> {
    /// Wraps `buffer`.
    pub fn new(buffer: B) -> Self {
        Self {
            inner: RwLock::new(buffer),
        }
    }

    /// Returns the wrapped buffer.
    pub fn into_inner(self) -> B {
        self.inner.into_inner()
    }

    /// Returns a mutable reference to the wrapped buffer. No locking is needed since the
    /// borrow is exclusive.
    pub fn get_mut(&mut self) -> &mut B {
        self.inner.get_mut()
    }
}

impl<B: Buffer> SyncBuf<B> {
    /// Appends `item` at the write frontier. See [`Buffer::append`].
    pub fn append(&self, item: B::Item) -> Result<(), Error> {
        self.inner.write().append(item)
    }

    /// Marks everything up to and including `position` as dropped. See
    /// [`Buffer::drop_until`].
    pub fn drop_until(&self, position: Position) -> Result<(), Error> {
        self.inner.write().drop_until(position)
    }

    /// Returns a copy of the items from `start` up to the write frontier.
    pub fn to_vec(&self, start: Position) -> Result<Vec<B::Item>, Error> {
        self.inner.read().to_vec(start)
    }

    /// Returns a cursor over copies of the items from `start` up to the write frontier.
    ///
    /// The segments are copied while the read lock is held, so the cursor does not alias
    /// the wrapped buffer's storage and later writes cannot change what it yields. The
    /// cursor is not tied to the wrapper and may outlive it.
    pub fn iter<'any>(&self, start: Position) -> Result<Iter<'any, B::Item>, Error>
    where
        B::Item: 'any,
    {
        let inner = self.inner.read();
        let iter = inner.iter(start)?;
        trace!(start, len = iter.len(), "copying segments out of buffer");
        Ok(iter.into_owned())
    }

    /// Returns the position the next appended item will be assigned.
    pub fn frontier(&self) -> Position {
        self.inner.read().frontier()
    }
}

impl<B> From<B> for SyncBuf<B> {
    fn from(buffer: B) -> Self {
        Self::new(buffer)
    }
}

impl<B: Buffer> Buffer for SyncBuf<B> {
    type Item = B::Item;

    fn append(&mut self, item: B::Item) -> Result<(), Error> {
        self.get_mut().append(item)
    }

    fn drop_until(&mut self, position: Position) -> Result<(), Error> {
        self.get_mut().drop_until(position)
    }

    fn to_vec(&self, start: Position) -> Result<Vec<B::Item>, Error> {
        SyncBuf::to_vec(self, start)
    }

    fn iter(&self, start: Position) -> Result<Iter<'_, B::Item>, Error> {
        SyncBuf::iter(self, start)
    }

    fn frontier(&self) -> Position {
        SyncBuf::frontier(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RingBuf, SliceBuf};

    #[test]
    fn test_ring() {
        let buf = SyncBuf::new(RingBuf::new(3));
        buf.append('a').unwrap();
        buf.append('b').unwrap();
        buf.append('c').unwrap();
        assert_eq!(buf.append('d'), Err(Error::Overflow));
        assert_eq!(buf.to_vec(0).unwrap(), ['a', 'b', 'c']);

        buf.drop_until(0).unwrap();
        buf.append('d').unwrap();
        assert_eq!(buf.frontier(), 4);

        let iter = buf.iter(1).unwrap();
        assert!(iter.is_owned());
        assert_eq!(iter.into_vec(), ['b', 'c', 'd']);
        assert!(buf.iter(0).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_reads_are_snapshots() {
        let buf = SyncBuf::new(RingBuf::new(2));
        buf.append(1).unwrap();
        buf.append(2).unwrap();

        let items = buf.to_vec(0).unwrap();
        let mut iter = buf.iter(0).unwrap();
        assert!(iter.advance());

        // overwrite both slots
        buf.drop_until(1).unwrap();
        buf.append(3).unwrap();
        buf.append(4).unwrap();

        assert_eq!(items, [1, 2]);
        assert_eq!(iter.item(), Some(&1));
        assert_eq!(iter.into_vec(), [2]);
        assert_eq!(buf.to_vec(2).unwrap(), [3, 4]);
    }

    #[test]
    fn test_iter_outlives_wrapper() {
        let iter = {
            let buf = SyncBuf::new(RingBuf::new(3));
            buf.append(String::from("x")).unwrap();
            buf.append(String::from("y")).unwrap();
            buf.iter(0).unwrap()
        };
        assert_eq!(iter.into_vec(), ["x", "y"]);

        let handle = {
            let buf = SyncBuf::new(SliceBuf::new(2));
            buf.append(7).unwrap();
            let iter = buf.iter(0).unwrap();
            std::thread::spawn(move || iter.sum::<i32>())
        };
        assert_eq!(handle.join().unwrap(), 7);
    }

    #[test]
    fn test_as_buffer() {
        fn fill<B: Buffer<Item = u32>>(buf: &mut B) {
            for i in 0..4 {
                buf.append(i).unwrap();
            }
            buf.drop_until(1).unwrap();
        }

        let mut ring = SyncBuf::new(RingBuf::new(4));
        fill(&mut ring);
        assert_eq!(Buffer::to_vec(&ring, 2).unwrap(), [2, 3]);
        assert_eq!(ring.into_inner().dropped(), 1);

        let mut slice = SyncBuf::from(SliceBuf::new(4));
        fill(&mut slice);
        assert!(Buffer::iter(&slice, 2).unwrap().eq([2, 3]));
        assert_eq!(slice.get_mut().len(), 2);
    }
}
