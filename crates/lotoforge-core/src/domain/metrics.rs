//! Fixed vector of per-constraint statistics.

use super::constraint_type::ConstraintType;
use super::mask::NumberMask;

/// One integer per [`ConstraintType`], indexed by [`ConstraintType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeneratedMetrics {
    values: [u32; ConstraintType::COUNT],
    has_reference: bool,
}

impl GeneratedMetrics {
    /// Measures every constraint type on `mask`.
    pub fn measure(mask: NumberMask, reference: Option<NumberMask>) -> Self {
        Self {
            values: ConstraintType::ALL.map(|t| t.measure(mask, reference)),
            has_reference: reference.is_some(),
        }
    }

    pub fn get(&self, constraint: ConstraintType) -> u32 {
        self.values[constraint.index()]
    }

    /// True if `Repeats` was measured against a reference draw.
    pub fn has_reference(&self) -> bool {
        self.has_reference
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintType, u32)> + '_ {
        ConstraintType::ALL.into_iter().zip(self.values.iter().copied())
    }

    pub fn as_array(&self) -> &[u32; ConstraintType::COUNT] {
        &self.values
    }
}
