//! Filter rules resolved from enabled filter states.

use lotoforge_core::{ConstraintType, FilterState, GeneratedMetrics, NumberRange};
use smallvec::SmallVec;

/// An inclusive bound on one constraint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterRule {
    pub constraint: ConstraintType,
    pub bound: NumberRange,
}

impl FilterRule {
    pub fn new(constraint: ConstraintType, bound: NumberRange) -> Self {
        Self { constraint, bound }
    }

    /// Resolves a filter state; disabled states yield no rule.
    pub fn from_state(state: &FilterState) -> Option<Self> {
        state
            .enabled
            .then(|| Self::new(state.constraint, state.range))
    }

    /// True iff the metric for this rule's constraint lies inside the bound.
    pub fn matches(&self, metrics: &GeneratedMetrics) -> bool {
        self.bound.contains(metrics.get(self.constraint))
    }
}

/// The active rules of one request, in declaration order.
///
/// A ticket is valid iff every rule matches; an empty set accepts
/// everything.
///
/// # Example
///
/// ```
/// use lotoforge_core::{ConstraintType, FilterState, NumberRange, Ticket};
/// use lotoforge_scoring::{calculate, FilterSet};
///
/// let filters = FilterSet::from_states(&[
///     FilterState::enabled(ConstraintType::Sum, NumberRange::new(100, 130).unwrap()),
///     FilterState::disabled(ConstraintType::Evens),
/// ]);
/// assert_eq!(filters.len(), 1);
///
/// let metrics = calculate(&Ticket::new(1..=15).unwrap(), None);
/// assert!(filters.matches(&metrics));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    rules: SmallVec<[FilterRule; ConstraintType::COUNT]>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the enabled states, keeping their order.
    pub fn from_states(states: &[FilterState]) -> Self {
        Self {
            rules: states.iter().filter_map(FilterRule::from_state).collect(),
        }
    }

    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn matches(&self, metrics: &GeneratedMetrics) -> bool {
        self.rules.iter().all(|rule| rule.matches(metrics))
    }

    /// Constraint type of the first rule that rejects `metrics`.
    pub fn first_failure(&self, metrics: &GeneratedMetrics) -> Option<ConstraintType> {
        self.rules
            .iter()
            .find(|rule| !rule.matches(metrics))
            .map(|rule| rule.constraint)
    }

    /// Intersection of every bound placed on `constraint`, as `(lo, hi)`.
    ///
    /// `None` when the constraint is unbounded. `lo > hi` means the rules
    /// contradict each other.
    pub fn combined_bound(&self, constraint: ConstraintType) -> Option<(u32, u32)> {
        self.rules
            .iter()
            .filter(|rule| rule.constraint == constraint)
            .fold(None, |acc, rule| {
                let (lo, hi) = acc.unwrap_or((u32::MIN, u32::MAX));
                Some((lo.max(rule.bound.min()), hi.min(rule.bound.max())))
            })
    }

    /// True if any rule needs the last draw to be evaluated.
    pub fn requires_history(&self) -> bool {
        self.rules.iter().any(|rule| rule.constraint.requires_history())
    }

    /// Rough probability that a random ticket passes every rule, from the
    /// historical success weights of the constrained types.
    pub fn estimated_success_rate(&self) -> f64 {
        let mut seen = [false; ConstraintType::COUNT];
        self.rules
            .iter()
            .filter(|rule| !std::mem::replace(&mut seen[rule.constraint.index()], true))
            .map(|rule| rule.constraint.historical_success_rate())
            .product()
    }
}
