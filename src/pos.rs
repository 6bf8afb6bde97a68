use std::ops::Range;

use crate::{Error, Position};

/// Position arithmetic of a circular buffer with `cap` physical slots.
///
/// All arithmetic on positions wraps: differences are taken with `wrapping_sub` and then
/// widened to `i64` so they can be compared against slot counts without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    // Logical position of physical slot 0 in the current generation.
    base: Position,
    // Invariant: `next` <= `cap`
    next: usize,
    // Invariant: 0 < `cap` <= `MAX_CAPACITY`
    cap: usize,
}

impl Window {
    /// Creates a window whose first append lands on `start`.
    ///
    /// The previous generation is considered fully written, so the first append wraps and
    /// moves `base` to `start`.
    pub fn starting_at(cap: usize, start: Position) -> Self {
        Self::new(cap, start.wrapping_sub(cap as Position), cap)
    }

    pub fn new(cap: usize, base: Position, next: usize) -> Self {
        debug_assert!(cap > 0 && cap <= crate::MAX_CAPACITY);
        debug_assert!(next <= cap);
        Self { base, next, cap }
    }

    #[inline(always)]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub const fn base(&self) -> Position {
        self.base
    }

    #[inline(always)]
    pub const fn next(&self) -> usize {
        self.next
    }

    /// The position the next append will be assigned.
    #[inline(always)]
    pub const fn frontier(&self) -> Position {
        self.base.wrapping_add(self.next as Position)
    }

    /// The lowest position still physically present in the backing slots.
    #[inline(always)]
    pub const fn bottom(&self) -> Position {
        self.base.wrapping_sub((self.cap - self.next) as Position)
    }

    /// Returns `true` if writing the next item would reuse a slot holding a position after
    /// `dropped`.
    #[inline]
    pub const fn would_overwrite(&self, dropped: Position) -> bool {
        // drop + cap < base + next
        (self.cap as i64) < self.base.wrapping_sub(dropped) as i64 + self.next as i64
    }

    /// Returns `true` if `pos` has already been assigned to an item.
    #[inline]
    pub const fn is_written(&self, pos: Position) -> bool {
        // pos < base + next
        (pos.wrapping_sub(self.base) as i64) < self.next as i64
    }

    /// Advances the write cursor by one and returns the physical slot to write to.
    pub fn advance(&mut self) -> usize {
        let slot = self.next % self.cap;
        if slot == 0 {
            self.base = self.base.wrapping_add(self.cap as Position);
        }
        self.next = slot + 1;
        slot
    }

    /// Resolves the physical slots holding `start..frontier`, in logical order.
    ///
    /// The second range is empty unless the requested positions straddle the point where
    /// the backing slots wrap.
    pub fn resolve(&self, start: Position) -> Result<(Range<usize>, Range<usize>), Error> {
        let begin = start.wrapping_sub(self.base) as i64;
        if 0 <= begin && begin <= self.next as i64 {
            return Ok((begin as usize..self.next, 0..0));
        }

        let diff = self.base.wrapping_sub(start) as i64;
        if 0 < diff && self.next as i64 + diff <= self.cap as i64 {
            let begin = self.cap - diff as usize;
            return Ok((begin..self.cap, 0..self.next));
        }

        Err(Error::out_of_range(start, self.bottom(), self.frontier()))
    }
}
