//! 25-bit set representation of a selection of numbers.

use std::fmt;

use crate::error::{LotoError, Result};

/// Highest number that can be drawn.
pub const MAX_NUMBER: u8 = 25;

/// Number of members in every ticket and draw.
pub const TICKET_SIZE: usize = 15;

const FULL_BITS: u32 = (1 << MAX_NUMBER) - 1;

/// A set of numbers in `1..=25`, bit `v - 1` set for each member `v`.
///
/// All set operations are single machine instructions; in particular
/// [`intersect_count`](Self::intersect_count) is a population count of a
/// bitwise AND.
///
/// # Example
///
/// ```
/// use lotoforge_core::NumberMask;
///
/// let a = NumberMask::from_numbers([1, 2, 3, 10]).unwrap();
/// let b = NumberMask::from_numbers([2, 3, 4]).unwrap();
///
/// assert_eq!(a.intersect_count(b), 2);
/// assert_eq!(a.numbers(), vec![1, 2, 3, 10]);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumberMask(u32);

impl NumberMask {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every number in `1..=25`.
    pub const FULL: Self = Self(FULL_BITS);

    /// Builds a mask at compile time. Numbers outside `1..=25` are ignored.
    pub const fn of(numbers: &[u8]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < numbers.len() {
            let n = numbers[i];
            if n >= 1 && n <= MAX_NUMBER {
                bits |= 1 << (n - 1);
            }
            i += 1;
        }
        Self(bits)
    }

    /// Builds a mask from numbers, rejecting values outside `1..=25` and
    /// duplicates.
    pub fn from_numbers(numbers: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut mask = Self::EMPTY;
        for n in numbers {
            if !(1..=MAX_NUMBER).contains(&n) {
                return Err(LotoError::NumberOutOfRange(n));
            }
            if mask.contains(n) {
                return Err(LotoError::DuplicateNumber(n));
            }
            mask = mask.with(n);
        }
        Ok(mask)
    }

    /// Wraps raw bits, discarding anything above bit 24.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & FULL_BITS)
    }

    /// Numbers strictly greater than `n` (every number for `n == 0`).
    pub const fn above(n: u8) -> Self {
        if n >= MAX_NUMBER {
            Self::EMPTY
        } else {
            Self(FULL_BITS & !((1u32 << n) - 1))
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, n: u8) -> bool {
        n >= 1 && n <= MAX_NUMBER && self.0 & (1 << (n - 1)) != 0
    }

    /// Returns a copy with `n` added. `n` must be in `1..=25`.
    pub const fn with(self, n: u8) -> Self {
        Self(self.0 | (1 << (n - 1)))
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Size of the intersection of two sets.
    pub const fn intersect_count(self, other: Self) -> u32 {
        (self.0 & other.0).count_ones()
    }

    /// Sum of all members.
    pub fn sum(self) -> u32 {
        self.iter().map(u32::from).sum()
    }

    /// Members in ascending order.
    pub fn iter(self) -> MaskIter {
        MaskIter { bits: self.0 }
    }

    pub fn numbers(self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl fmt::Debug for NumberMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for NumberMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for n in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{n:02}")?;
            first = false;
        }
        Ok(())
    }
}

impl IntoIterator for NumberMask {
    type Item = u8;
    type IntoIter = MaskIter;

    fn into_iter(self) -> MaskIter {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`NumberMask`].
#[derive(Debug, Clone)]
pub struct MaskIter {
    bits: u32,
}

impl Iterator for MaskIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(idx as u8 + 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for MaskIter {}

impl NumberMask {
    /// Count of maximal runs of consecutive members at least `min_len` long.
    pub fn runs_of_at_least(self, min_len: u32) -> u32 {
        let mut runs = 0;
        let mut bits = self.0;
        while bits != 0 {
            bits >>= bits.trailing_zeros();
            let len = bits.trailing_ones();
            if len >= min_len {
                runs += 1;
            }
            bits = bits.checked_shr(len).unwrap_or(0);
        }
        runs
    }
}
