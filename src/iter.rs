use std::{borrow::Cow, iter::FusedIterator};

/// Forward-only cursor over up to two segments of a buffer's contents.
///
/// Returned by [`Buffer::iter`](crate::Buffer::iter). The segments are usually slices
/// borrowed from the buffer's backing storage, in which case no item is copied until it is
/// yielded. [`SyncBuf`](crate::SyncBuf) hands out cursors over owned copies instead.
///
/// The cursor can be driven either through [`advance`](Self::advance) and
/// [`item`](Self::item), which never clone, or as a regular [`Iterator`] yielding cloned
/// items.
///
/// # Examples
/// ```
/// # use logical_ring::Iter;
/// let mut iter = Iter::new(&[1, 2][..], &[3][..]);
/// assert_eq!(iter.item(), None);
/// assert!(iter.advance());
/// assert_eq!(iter.item(), Some(&1));
/// assert_eq!(iter.into_vec(), [2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Iter<'buf, A: Clone> {
    segments: [Cow<'buf, [A]>; 2],
    // Invariant: `slot` <= 2
    slot: usize,
    // Index of the current item within `segments[slot]`, `None` before the first
    // `advance` and after exhaustion.
    cursor: Option<usize>,
}

impl<'buf, A: Clone> Iter<'buf, A> {
    /// Creates a cursor that yields all of `first`, then all of `second`.
    pub fn new(first: impl Into<Cow<'buf, [A]>>, second: impl Into<Cow<'buf, [A]>>) -> Self {
        Self {
            segments: [first.into(), second.into()],
            slot: 0,
            cursor: None,
        }
    }

    pub(crate) fn borrowed(first: &'buf [A], second: &'buf [A]) -> Self {
        Self::new(first, second)
    }

    /// Advances to the next item, returning `true` if there is one.
    ///
    /// Once this returns `false` it keeps returning `false`.
    pub fn advance(&mut self) -> bool {
        let mut next = self.cursor.map_or(0, |idx| idx + 1);
        while let Some(segment) = self.segments.get(self.slot) {
            if next < segment.len() {
                self.cursor = Some(next);
                return true;
            }
            self.slot += 1;
            next = 0;
        }
        self.cursor = None;
        false
    }

    /// Returns the item the last successful [`advance`](Self::advance) moved to.
    pub fn item(&self) -> Option<&A> {
        let idx = self.cursor?;
        self.segments.get(self.slot)?.get(idx)
    }

    /// Returns the number of items not yet reached.
    pub fn remaining(&self) -> usize {
        let Some(current) = self.segments.get(self.slot) else {
            return 0;
        };
        let consumed = self.cursor.map_or(0, |idx| idx + 1);
        let rest: usize = self.segments[self.slot + 1..].iter().map(|s| s.len()).sum();
        current.len() - consumed + rest
    }

    /// Drains the items not yet reached into a new `Vec`.
    pub fn into_vec(mut self) -> Vec<A> {
        let mut ret = Vec::with_capacity(self.remaining());
        while self.advance() {
            if let Some(item) = self.item() {
                ret.push(item.clone());
            }
        }
        ret
    }

    /// Copies any borrowed segment, detaching the cursor from the buffer it was taken from.
    ///
    /// The cursor position is preserved.
    pub fn into_owned<'any>(self) -> Iter<'any, A> {
        let [first, second] = self.segments;
        Iter {
            segments: [
                Cow::Owned(first.into_owned()),
                Cow::Owned(second.into_owned()),
            ],
            slot: self.slot,
            cursor: self.cursor,
        }
    }

    /// Returns `true` if every segment owns its items.
    pub fn is_owned(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Cow::Owned(_)))
    }
}

impl<A: Clone> Iterator for Iter<'_, A> {
    type Item = A;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.item().cloned()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.remaining()
    }
}

impl<A: Clone> FusedIterator for Iter<'_, A> {}

impl<A: Clone> ExactSizeIterator for Iter<'_, A> {
    fn len(&self) -> usize {
        self.remaining()
    }
}
