//! Immutable 15-of-25 ticket.

use std::fmt;

use super::mask::{NumberMask, TICKET_SIZE};
use crate::error::{LotoError, Result};

/// A selection of exactly 15 distinct numbers in `1..=25`.
///
/// Numbers are kept sorted alongside the cached mask. Two tickets are equal
/// when they hold the same set of numbers, regardless of input order.
///
/// # Example
///
/// ```
/// use lotoforge_core::Ticket;
///
/// let a = Ticket::new([15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
/// let b = Ticket::new(1..=15).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.numbers()[0], 1);
///
/// assert!(Ticket::new(1..=14).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct Ticket {
    mask: NumberMask,
    numbers: [u8; TICKET_SIZE],
}

impl Ticket {
    /// Creates a ticket, validating range, uniqueness and cardinality.
    pub fn new(numbers: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut count = 0usize;
        let mask = NumberMask::from_numbers(numbers.into_iter().inspect(|_| count += 1))?;
        if count != TICKET_SIZE {
            return Err(LotoError::WrongCardinality {
                expected: TICKET_SIZE,
                actual: count,
            });
        }
        Self::from_mask(mask)
    }

    /// Creates a ticket from a mask with exactly 15 members.
    pub fn from_mask(mask: NumberMask) -> Result<Self> {
        let actual = mask.len() as usize;
        if actual != TICKET_SIZE {
            return Err(LotoError::WrongCardinality {
                expected: TICKET_SIZE,
                actual,
            });
        }
        let mut numbers = [0u8; TICKET_SIZE];
        for (slot, n) in numbers.iter_mut().zip(mask.iter()) {
            *slot = n;
        }
        Ok(Self { mask, numbers })
    }

    pub fn mask(&self) -> NumberMask {
        self.mask
    }

    /// Members in ascending order.
    pub fn numbers(&self) -> &[u8; TICKET_SIZE] {
        &self.numbers
    }

    pub fn contains(&self, n: u8) -> bool {
        self.mask.contains(n)
    }

    /// Number of members shared with another selection.
    pub fn shared_with(&self, other: NumberMask) -> u32 {
        self.mask.intersect_count(other)
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket({})", self.mask)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mask, f)
    }
}

impl TryFrom<Vec<u8>> for Ticket {
    type Error = LotoError;

    fn try_from(numbers: Vec<u8>) -> Result<Self> {
        Self::new(numbers)
    }
}

impl From<Ticket> for Vec<u8> {
    fn from(ticket: Ticket) -> Self {
        ticket.numbers.to_vec()
    }
}
