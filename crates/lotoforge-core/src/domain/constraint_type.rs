//! The closed set of numeric ticket properties a filter can bound.
//!
//! Each variant carries its full legal range, an "ideal" and an "acceptable"
//! band (used for qualitative analysis) and a historical success weight used
//! for rough success-probability estimates. Membership-style constraints
//! also expose the fixed set of numbers they count.

use std::fmt;
use std::str::FromStr;

use super::filter::NumberRange;
use super::mask::NumberMask;
use crate::error::LotoError;

/// Even numbers in `1..=25`.
pub const EVEN_NUMBERS: NumberMask =
    NumberMask::of(&[2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]);

/// Primes in `1..=25`.
pub const PRIME_NUMBERS: NumberMask = NumberMask::of(&[2, 3, 5, 7, 11, 13, 17, 19, 23]);

/// Fibonacci numbers in `1..=25`.
pub const FIBONACCI_NUMBERS: NumberMask = NumberMask::of(&[1, 2, 3, 5, 8, 13, 21]);

/// Border of the 5x5 card layout.
pub const FRAME_NUMBERS: NumberMask = NumberMask::of(&[
    1, 2, 3, 4, 5, 6, 10, 11, 15, 16, 20, 21, 22, 23, 24, 25,
]);

/// Inner 3x3 block of the 5x5 card layout.
pub const CENTER_NUMBERS: NumberMask = NumberMask::of(&[7, 8, 9, 12, 13, 14, 17, 18, 19]);

/// Multiples of three in `1..=25`.
pub const MULTIPLES_OF_THREE: NumberMask = NumberMask::of(&[3, 6, 9, 12, 15, 18, 21, 24]);

/// Shortest run of consecutive members counted as a sequence.
pub const SEQUENCE_MIN_LEN: u32 = 3;

/// A numeric property of a ticket.
///
/// The declaration order is the rule evaluation order: when several rules
/// reject a ticket, the rejection is attributed to the earliest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintType {
    /// Sum of all members.
    Sum,
    /// Count of even members.
    Evens,
    /// Count of prime members.
    Primes,
    /// Count of Fibonacci members.
    Fibonacci,
    /// Count of members on the card border.
    Frame,
    /// Count of maximal runs of at least three consecutive members.
    Sequences,
    /// Count of multiples of three.
    MultiplesOfThree,
    /// Count of members in the inner 3x3 block.
    Center,
    /// Count of members repeated from the last draw.
    Repeats,
}

impl ConstraintType {
    /// Number of constraint types.
    pub const COUNT: usize = 9;

    /// All constraint types in evaluation order.
    pub const ALL: [ConstraintType; Self::COUNT] = [
        ConstraintType::Sum,
        ConstraintType::Evens,
        ConstraintType::Primes,
        ConstraintType::Fibonacci,
        ConstraintType::Frame,
        ConstraintType::Sequences,
        ConstraintType::MultiplesOfThree,
        ConstraintType::Center,
        ConstraintType::Repeats,
    ];

    /// Position in [`ALL`](Self::ALL), usable as an array index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case identifier.
    pub const fn name(self) -> &'static str {
        match self {
            ConstraintType::Sum => "sum",
            ConstraintType::Evens => "evens",
            ConstraintType::Primes => "primes",
            ConstraintType::Fibonacci => "fibonacci",
            ConstraintType::Frame => "frame",
            ConstraintType::Sequences => "sequences",
            ConstraintType::MultiplesOfThree => "multiples_of_three",
            ConstraintType::Center => "center",
            ConstraintType::Repeats => "repeats",
        }
    }

    /// Every value the property can take on a valid 15-of-25 ticket.
    pub const fn full_range(self) -> NumberRange {
        let (min, max) = match self {
            ConstraintType::Sum => (120, 270),
            ConstraintType::Evens => (2, 12),
            ConstraintType::Primes => (0, 9),
            ConstraintType::Fibonacci => (0, 7),
            ConstraintType::Frame => (6, 15),
            ConstraintType::Sequences => (0, 5),
            ConstraintType::MultiplesOfThree => (0, 8),
            ConstraintType::Center => (0, 9),
            ConstraintType::Repeats => (5, 15),
        };
        NumberRange::from_bounds(min, max)
    }

    pub const fn ideal_range(self) -> NumberRange {
        let (min, max) = match self {
            ConstraintType::Sum => (180, 220),
            ConstraintType::Evens => (7, 8),
            ConstraintType::Primes => (5, 6),
            ConstraintType::Fibonacci => (4, 5),
            ConstraintType::Frame => (9, 10),
            ConstraintType::Sequences => (2, 3),
            ConstraintType::MultiplesOfThree => (4, 5),
            ConstraintType::Center => (5, 6),
            ConstraintType::Repeats => (8, 10),
        };
        NumberRange::from_bounds(min, max)
    }

    pub const fn acceptable_range(self) -> NumberRange {
        let (min, max) = match self {
            ConstraintType::Sum => (166, 233),
            ConstraintType::Evens => (6, 9),
            ConstraintType::Primes => (4, 7),
            ConstraintType::Fibonacci => (3, 6),
            ConstraintType::Frame => (8, 11),
            ConstraintType::Sequences => (1, 4),
            ConstraintType::MultiplesOfThree => (3, 6),
            ConstraintType::Center => (4, 7),
            ConstraintType::Repeats => (7, 11),
        };
        NumberRange::from_bounds(min, max)
    }

    /// Distance outside the acceptable band still graded as a warning
    /// rather than a failure.
    pub const fn warning_margin(self) -> u32 {
        match self {
            ConstraintType::Sum => 15,
            _ => 1,
        }
    }

    /// Share of historical draws falling inside the acceptable band.
    pub const fn historical_success_rate(self) -> f64 {
        match self {
            ConstraintType::Sum => 0.72,
            ConstraintType::Evens => 0.82,
            ConstraintType::Primes => 0.77,
            ConstraintType::Fibonacci => 0.80,
            ConstraintType::Frame => 0.78,
            ConstraintType::Sequences => 0.85,
            ConstraintType::MultiplesOfThree => 0.81,
            ConstraintType::Center => 0.76,
            ConstraintType::Repeats => 0.83,
        }
    }

    /// The fixed set counted by membership constraints.
    ///
    /// `Sum` and `Sequences` are not membership counts and `Repeats` depends
    /// on the reference draw, so they return `None`.
    pub const fn member_mask(self) -> Option<NumberMask> {
        match self {
            ConstraintType::Evens => Some(EVEN_NUMBERS),
            ConstraintType::Primes => Some(PRIME_NUMBERS),
            ConstraintType::Fibonacci => Some(FIBONACCI_NUMBERS),
            ConstraintType::Frame => Some(FRAME_NUMBERS),
            ConstraintType::MultiplesOfThree => Some(MULTIPLES_OF_THREE),
            ConstraintType::Center => Some(CENTER_NUMBERS),
            ConstraintType::Sum | ConstraintType::Sequences | ConstraintType::Repeats => None,
        }
    }

    /// Measures this property on `mask`.
    ///
    /// `reference` is the last draw; `Repeats` measures 0 without one.
    pub fn measure(self, mask: NumberMask, reference: Option<NumberMask>) -> u32 {
        match self {
            ConstraintType::Sum => mask.sum(),
            ConstraintType::Sequences => mask.runs_of_at_least(SEQUENCE_MIN_LEN),
            ConstraintType::Repeats => reference.map_or(0, |r| mask.intersect_count(r)),
            ConstraintType::Evens => mask.intersect_count(EVEN_NUMBERS),
            ConstraintType::Primes => mask.intersect_count(PRIME_NUMBERS),
            ConstraintType::Fibonacci => mask.intersect_count(FIBONACCI_NUMBERS),
            ConstraintType::Frame => mask.intersect_count(FRAME_NUMBERS),
            ConstraintType::MultiplesOfThree => mask.intersect_count(MULTIPLES_OF_THREE),
            ConstraintType::Center => mask.intersect_count(CENTER_NUMBERS),
        }
    }

    /// True when the constraint needs a reference draw to be evaluated.
    pub const fn requires_history(self) -> bool {
        matches!(self, ConstraintType::Repeats)
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintType {
    type Err = LotoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LotoError::UnknownConstraint(s.to_string()))
    }
}
