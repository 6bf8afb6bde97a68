use tracing::debug;

use crate::{Buffer, Error, Iter, Position};

/// Bounded buffer with the same interface as [`RingBuf`](crate::RingBuf), backed by a
/// plain `Vec`.
///
/// At most `size` un-dropped items are held. [`append`](Buffer::append) fails with
/// [`Error::Overflow`] once that many are live, and [`drop_until`](Buffer::drop_until)
/// removes dropped items from the front, after which they can no longer be read.
///
/// # Examples
/// ```
/// # use logical_ring::{Buffer, Error, SliceBuf};
/// let mut buf = SliceBuf::new(5);
/// for i in 0..5 {
///     buf.append(i).unwrap();
/// }
/// assert_eq!(buf.append(5), Err(Error::Overflow));
///
/// buf.drop_until(1).unwrap();
/// buf.append(5).unwrap();
/// assert_eq!(buf.to_vec(2).unwrap(), [2, 3, 4, 5]);
/// assert!(buf.to_vec(1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SliceBuf<A> {
    items: Vec<A>,
    // Position of `items[0]`
    base: Position,
    size: usize,
}

impl<A> SliceBuf<A> {
    /// Creates an empty buffer holding at most `size` items, whose first item will be
    /// assigned position 0.
    pub fn new(size: usize) -> Self {
        Self::starting_at(size, 0)
    }

    /// Creates an empty buffer holding at most `size` items, whose first item will be
    /// assigned position `start`.
    pub fn starting_at(size: usize, start: Position) -> Self {
        Self {
            items: Vec::new(),
            base: start,
            size,
        }
    }

    /// Returns the maximum number of un-dropped items.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of items that have not been dropped.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if every appended item has been dropped.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the lowest position that can still be read.
    pub fn bottom(&self) -> Position {
        self.base
    }

    fn offset(&self, position: Position) -> i64 {
        position.wrapping_sub(self.base) as i64
    }

    fn out_of_range(&self, position: Position) -> Error {
        Error::out_of_range(position, self.base, self.frontier_position())
    }

    fn frontier_position(&self) -> Position {
        self.base.wrapping_add(self.items.len() as Position)
    }

    fn as_slice(&self, start: Position) -> Result<&[A], Error> {
        let offset = self.offset(start);
        if 0 <= offset && offset <= self.items.len() as i64 {
            Ok(&self.items[offset as usize..])
        } else {
            Err(self.out_of_range(start))
        }
    }
}

impl<A: Clone> Buffer for SliceBuf<A> {
    type Item = A;

    fn append(&mut self, item: A) -> Result<(), Error> {
        if self.items.len() >= self.size {
            debug!(size = self.size, "append rejected, buffer full");
            return Err(Error::Overflow);
        }
        self.items.push(item);
        Ok(())
    }

    fn drop_until(&mut self, position: Position) -> Result<(), Error> {
        let offset = self.offset(position);
        if offset >= self.items.len() as i64 {
            debug!(position, "drop rejected, position not written");
            return Err(self.out_of_range(position));
        }
        if offset >= 0 {
            self.items.drain(..=offset as usize);
            self.base = position.wrapping_add(1);
        }
        Ok(())
    }

    fn to_vec(&self, start: Position) -> Result<Vec<A>, Error> {
        self.as_slice(start).map(<[A]>::to_vec)
    }

    fn iter(&self, start: Position) -> Result<Iter<'_, A>, Error> {
        let items = self.as_slice(start)?;
        Ok(Iter::borrowed(items, <&[A]>::default()))
    }

    fn frontier(&self) -> Position {
        self.frontier_position()
    }
}
