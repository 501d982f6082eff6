//! Inclusive numeric ranges and caller-supplied filter states.

use std::fmt;

use super::constraint_type::ConstraintType;
use crate::error::{LotoError, Result};

/// An inclusive `min..=max` range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RangeBounds"))]
pub struct NumberRange {
    min: u32,
    max: u32,
}

impl NumberRange {
    /// Creates a range, rejecting `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(LotoError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a single-value range.
    pub const fn exactly(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub(crate) const fn from_bounds(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn min(&self) -> u32 {
        self.min
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// True if `lo..=hi` shares at least one value with this range.
    pub const fn overlaps(&self, lo: u32, hi: u32) -> bool {
        lo <= self.max && hi >= self.min
    }

    /// How far `value` lies outside the range (0 when inside).
    pub const fn distance(&self, value: u32) -> u32 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0
        }
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RangeBounds {
    min: u32,
    max: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RangeBounds> for NumberRange {
    type Error = LotoError;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

/// One filter as configured by the caller.
///
/// Only enabled states constrain generation; disabled states keep their
/// range so a UI can toggle them without losing the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterState {
    pub constraint: ConstraintType,
    pub enabled: bool,
    pub range: NumberRange,
}

impl FilterState {
    /// An enabled filter on `constraint` bounded by `range`.
    pub fn enabled(constraint: ConstraintType, range: NumberRange) -> Self {
        Self {
            constraint,
            enabled: true,
            range,
        }
    }

    /// A disabled filter spanning the constraint's full range.
    pub fn disabled(constraint: ConstraintType) -> Self {
        Self {
            constraint,
            enabled: false,
            range: constraint.full_range(),
        }
    }

    /// An enabled filter bounded by the constraint's ideal band.
    pub fn ideal(constraint: ConstraintType) -> Self {
        Self::enabled(constraint, constraint.ideal_range())
    }
}
