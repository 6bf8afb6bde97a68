//! Fixed-capacity circular buffers addressed by logical position.
//!
//! Every appended item is assigned the next [`Position`] of an unbounded, wrapping stream.
//! Old items are released with [`drop_until`](Buffer::drop_until), and any suffix of the
//! retained items can be read back with [`to_vec`](Buffer::to_vec) or
//! [`iter`](Buffer::iter).
//!
//! ```
//! # use logical_ring::{Buffer, Error, RingBuf};
//! let mut buf = RingBuf::new(3);
//! buf.append('a')?;
//! buf.append('b')?;
//! buf.append('c')?;
//! assert_eq!(buf.append('d'), Err(Error::Overflow));
//!
//! buf.drop_until(0)?;
//! buf.append('d')?;
//! assert_eq!(buf.to_vec(1)?, ['b', 'c', 'd']);
//! # Ok::<(), Error>(())
//! ```

pub mod config;
pub mod error;
pub mod iter;
mod pos;
pub mod slice;
pub mod sync;

use tracing::{debug, trace};

pub use self::{
    config::Config,
    error::{CapacityError, Error},
    iter::Iter,
    slice::SliceBuf,
    sync::SyncBuf,
};

use self::pos::Window;

/// Logical position of an item. Arithmetic on positions wraps around at the type's bounds.
pub type Position = i32;

/// Largest capacity a [`RingBuf`] can be created with.
pub const MAX_CAPACITY: usize = Position::MAX as usize;

/// Operations shared by every buffer flavour.
pub trait Buffer {
    type Item: Clone;

    /// Appends an item at the [write frontier](Self::frontier).
    fn append(&mut self, item: Self::Item) -> Result<(), Error>;

    /// Marks every position up to and including `position` as no longer needed.
    ///
    /// Fails with [`Error::OutOfRange`] if `position` has not been written yet.
    fn drop_until(&mut self, position: Position) -> Result<(), Error>;

    /// Copies the items from `start` up to the write frontier into a new `Vec`.
    fn to_vec(&self, start: Position) -> Result<Vec<Self::Item>, Error>;

    /// Returns a cursor over the items from `start` up to the write frontier.
    fn iter(&self, start: Position) -> Result<Iter<'_, Self::Item>, Error>;

    /// The position the next appended item will be assigned.
    fn frontier(&self) -> Position;
}

/// Circular buffer of `capacity` slots, addressed by logical [`Position`].
///
/// Appending never evicts on its own: once every slot holds an item that has not been
/// [dropped](Buffer::drop_until), [`append`](Buffer::append) fails with
/// [`Error::Overflow`] until the caller drops something.
///
/// Reads are resolved against the physical slots, not the drop marker, so a dropped item
/// can still be read until its slot is reused. The cursor returned by
/// [`iter`](Buffer::iter) borrows the backing slots directly.
#[derive(Clone)]
pub struct RingBuf<A> {
    // Invariant: `buf.len() == window.cap()`
    buf: Box<[A]>,
    window: Window,
    dropped: Position,
}

impl<A: Clone + Default> RingBuf<A> {
    /// Creates a ring buffer whose first item will be assigned position 0.
    ///
    /// # Panics
    /// Panics if `capacity` is 0 or greater than [`MAX_CAPACITY`].
    #[track_caller]
    pub fn new(capacity: usize) -> Self {
        Self::starting_at(capacity, 0)
    }

    /// Creates a ring buffer whose first item will be assigned position `start`.
    ///
    /// # Panics
    /// Panics if `capacity` is 0 or greater than [`MAX_CAPACITY`].
    ///
    /// # Examples
    /// ```
    /// # use logical_ring::{Buffer, RingBuf};
    /// let mut buf = RingBuf::starting_at(4, i32::MAX);
    /// buf.append(1).unwrap();
    /// buf.append(2).unwrap();
    /// assert_eq!(buf.frontier(), i32::MIN.wrapping_add(1));
    /// assert_eq!(buf.to_vec(i32::MAX).unwrap(), [1, 2]);
    /// ```
    #[track_caller]
    pub fn starting_at(capacity: usize, start: Position) -> Self {
        match Self::try_starting_at(capacity, start) {
            Ok(buf) => buf,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible version of [`new`](Self::new).
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        Self::try_starting_at(capacity, 0)
    }

    /// Fallible version of [`starting_at`](Self::starting_at).
    pub fn try_starting_at(capacity: usize, start: Position) -> Result<Self, CapacityError> {
        Config { capacity, start }.validate()?;
        let mut buf = Vec::new();
        buf.resize_with(capacity, A::default);
        Ok(Self {
            buf: buf.into_boxed_slice(),
            window: Window::starting_at(capacity, start),
            dropped: start.wrapping_sub(1),
        })
    }
}

impl<A> RingBuf<A> {
    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.window.cap()
    }

    /// Returns the drop marker: the last position released by
    /// [`drop_until`](Buffer::drop_until).
    pub fn dropped(&self) -> Position {
        self.dropped
    }

    /// Returns the lowest position that can still be read.
    ///
    /// # Examples
    /// ```
    /// # use logical_ring::{Buffer, RingBuf};
    /// let mut buf = RingBuf::new(2);
    /// buf.append(10).unwrap();
    /// buf.append(11).unwrap();
    /// buf.drop_until(0).unwrap();
    /// buf.append(12).unwrap();
    /// assert_eq!(buf.bottom(), 1);
    /// assert_eq!(buf.to_vec(buf.bottom()).unwrap(), [11, 12]);
    /// ```
    pub fn bottom(&self) -> Position {
        self.window.bottom()
    }

    /// Returns the number of items that have been appended and not dropped.
    pub fn len(&self) -> usize {
        let live = self.window.frontier().wrapping_sub(self.dropped) as i64 - 1;
        // `live` is never negative because the drop marker stays behind the frontier
        (live.max(0) as usize).min(self.capacity())
    }

    /// Returns `true` if every appended item has been dropped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the next [`append`](Buffer::append) would fail with
    /// [`Error::Overflow`].
    pub fn is_full(&self) -> bool {
        self.window.would_overwrite(self.dropped)
    }

    /// Returns the one or two slices holding the items from `start` to the write frontier,
    /// in logical order.
    ///
    /// The slices alias the backing slots and are only meaningful until the next append.
    ///
    /// # Examples
    /// ```
    /// # use logical_ring::{Buffer, RingBuf};
    /// let mut buf = RingBuf::new(3);
    /// for i in 0..3 {
    ///     buf.append(i).unwrap();
    /// }
    /// buf.drop_until(1).unwrap();
    /// buf.append(3).unwrap();
    /// buf.append(4).unwrap();
    /// assert_eq!(buf.as_slices(2).unwrap(), (&[2][..], &[3, 4][..]));
    /// assert_eq!(buf.as_slices(3).unwrap(), (&[3, 4][..], &[][..]));
    /// ```
    pub fn as_slices(&self, start: Position) -> Result<(&[A], &[A]), Error> {
        let (first, second) = self.window.resolve(start)?;
        Ok((&self.buf[first], &self.buf[second]))
    }
}

impl<A: Clone> Buffer for RingBuf<A> {
    type Item = A;

    /// Writes `item` into the next physical slot.
    ///
    /// Fails with [`Error::Overflow`] if that slot still holds an item that has not been
    /// dropped. Nothing is evicted implicitly.
    ///
    /// # Examples
    /// ```
    /// # use logical_ring::{Buffer, Error, RingBuf};
    /// let mut buf = RingBuf::new(2);
    /// assert_eq!(buf.append(0), Ok(()));
    /// assert_eq!(buf.append(1), Ok(()));
    /// assert_eq!(buf.append(2), Err(Error::Overflow));
    /// buf.drop_until(0).unwrap();
    /// assert_eq!(buf.append(2), Ok(()));
    /// ```
    fn append(&mut self, item: A) -> Result<(), Error> {
        if self.window.would_overwrite(self.dropped) {
            debug!(
                frontier = self.window.frontier(),
                dropped = self.dropped,
                "append rejected, slot not dropped"
            );
            return Err(Error::Overflow);
        }

        let slot = self.window.advance();
        if slot == 0 {
            trace!(base = self.window.base(), "ring buffer wrapped");
        }
        self.buf[slot] = item;
        Ok(())
    }

    /// Moves the drop marker forward to `position`.
    ///
    /// Dropping at or below the current marker is a no-op. The slots are left untouched,
    /// so dropped items remain readable until they are overwritten.
    ///
    /// # Examples
    /// ```
    /// # use logical_ring::{Buffer, RingBuf};
    /// let mut buf = RingBuf::new(3);
    /// buf.append(0).unwrap();
    /// buf.append(1).unwrap();
    /// assert!(buf.drop_until(2).unwrap_err().is_out_of_range());
    /// buf.drop_until(1).unwrap();
    /// buf.drop_until(0).unwrap();
    /// assert_eq!(buf.dropped(), 1);
    /// assert_eq!(buf.to_vec(0).unwrap(), [0, 1]);
    /// ```
    fn drop_until(&mut self, position: Position) -> Result<(), Error> {
        if !self.window.is_written(position) {
            debug!(
                position,
                frontier = self.window.frontier(),
                "drop rejected, position not written"
            );
            return Err(Error::out_of_range(
                position,
                self.window.bottom(),
                self.window.frontier(),
            ));
        }

        if position.wrapping_sub(self.dropped) > 0 {
            self.dropped = position;
        }
        Ok(())
    }

    fn to_vec(&self, start: Position) -> Result<Vec<A>, Error> {
        let (first, second) = self.as_slices(start)?;
        let mut ret = Vec::with_capacity(first.len() + second.len());
        ret.extend_from_slice(first);
        ret.extend_from_slice(second);
        Ok(ret)
    }

    /// Returns a cursor borrowing the backing slots.
    ///
    /// # Examples
    /// ```
    /// # use logical_ring::{Buffer, RingBuf};
    /// let mut buf = RingBuf::new(2);
    /// buf.append("a").unwrap();
    /// buf.append("b").unwrap();
    /// let mut iter = buf.iter(0).unwrap();
    /// while iter.advance() {
    ///     assert!(iter.item().is_some());
    /// }
    /// assert!(buf.iter(0).unwrap().eq(["a", "b"]));
    /// ```
    fn iter(&self, start: Position) -> Result<Iter<'_, A>, Error> {
        let (first, second) = self.as_slices(start)?;
        Ok(Iter::borrowed(first, second))
    }

    fn frontier(&self) -> Position {
        self.window.frontier()
    }
}

impl<A> std::fmt::Debug for RingBuf<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RingBuf")
            .field("capacity", &self.capacity())
            .field("base", &self.window.base())
            .field("next", &self.window.next())
            .field("dropped", &self.dropped)
            .finish()
    }
}
