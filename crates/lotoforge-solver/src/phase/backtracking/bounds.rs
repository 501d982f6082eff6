//! Feasibility bounds for the backtracking search.
//!
//! For a partial ticket whose largest member is `last`, with `remaining`
//! picks still to make from `last + 1..=25`, every bound projects the
//! range of values still reachable and checks it against the rule.

use lotoforge_core::{ConstraintType, NumberMask, MAX_NUMBER, TICKET_SIZE};
use lotoforge_scoring::FilterSet;
use smallvec::SmallVec;

/// `after(n)` = members of a set greater than `n`, for `n` in `0..=25`.
#[derive(Debug, Clone)]
pub(crate) struct SuffixTable {
    after: [u8; MAX_NUMBER as usize + 1],
}

impl SuffixTable {
    pub(crate) fn new(members: NumberMask) -> Self {
        Self {
            after: std::array::from_fn(|n| {
                NumberMask::above(n as u8).intersect_count(members) as u8
            }),
        }
    }

    pub(crate) fn after(&self, n: u8) -> u32 {
        u32::from(self.after[n as usize])
    }
}

/// A bound on how many members of a fixed set the ticket holds.
#[derive(Debug, Clone)]
pub(crate) struct CountBound {
    pub(crate) constraint: ConstraintType,
    pub(crate) members: NumberMask,
    suffix: SuffixTable,
    lo: u32,
    hi: u32,
}

impl CountBound {
    pub(crate) fn new(constraint: ConstraintType, members: NumberMask, lo: u32, hi: u32) -> Self {
        Self {
            constraint,
            members,
            suffix: SuffixTable::new(members),
            lo,
            hi,
        }
    }

    pub(crate) fn is_feasible(&self, count: u32, last: u8, remaining: u32) -> bool {
        let above = u32::from(MAX_NUMBER - last);
        let qualifying = self.suffix.after(last);
        let max_extra = remaining.min(qualifying);
        let min_extra = remaining.saturating_sub(above - qualifying);
        self.lo <= self.hi && count + min_extra <= self.hi && count + max_extra >= self.lo
    }
}

/// Closed-form bound on the ticket sum.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SumBound {
    lo: u32,
    hi: u32,
}

impl SumBound {
    pub(crate) fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    /// `last+1 + .. + last+remaining`
    fn min_extra(last: u8, remaining: u32) -> u32 {
        remaining * u32::from(last) + remaining * (remaining + 1) / 2
    }

    /// `25 + 24 + .. + (25-remaining+1)`
    fn max_extra(remaining: u32) -> u32 {
        remaining * u32::from(MAX_NUMBER) - remaining * remaining.saturating_sub(1) / 2
    }

    pub(crate) fn is_feasible(&self, sum: u32, last: u8, remaining: u32) -> bool {
        self.lo <= self.hi
            && sum + Self::min_extra(last, remaining) <= self.hi
            && sum + Self::max_extra(remaining) >= self.lo
    }
}

/// A partial ticket: members picked so far in ascending order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) mask: NumberMask,
    pub(crate) last: u8,
    pub(crate) depth: u32,
    pub(crate) sum: u32,
    pub(crate) counts: [u8; ConstraintType::COUNT],
}

impl Node {
    pub(crate) const ROOT: Node = Node {
        mask: NumberMask::EMPTY,
        last: 0,
        depth: 0,
        sum: 0,
        counts: [0; ConstraintType::COUNT],
    };

    pub(crate) fn remaining(&self) -> u32 {
        TICKET_SIZE as u32 - self.depth
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.depth as usize == TICKET_SIZE
    }

    /// The child node after picking `n`, which must be above `last`.
    pub(crate) fn push(&self, n: u8, bounds: &SearchBounds) -> Node {
        let mut counts = self.counts;
        for (count, bound) in counts.iter_mut().zip(&bounds.counts) {
            if bound.members.contains(n) {
                *count += 1;
            }
        }
        Node {
            mask: self.mask.with(n),
            last: n,
            depth: self.depth + 1,
            sum: self.sum + u32::from(n),
            counts,
        }
    }
}

/// Every bound derived from one filter set.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchBounds {
    sum: Option<SumBound>,
    counts: SmallVec<[CountBound; ConstraintType::COUNT]>,
}

impl SearchBounds {
    /// Resolves the rules that can be checked on partial tickets.
    ///
    /// Membership-count rules get a suffix table (the repeat rule uses the
    /// reference draw as its member set); the sum rule gets the closed-form
    /// bound. Duplicate rules on one type are intersected. Sequences are
    /// left to the leaf check.
    pub(crate) fn from_filters(filters: &FilterSet, reference: Option<NumberMask>) -> Self {
        let sum = filters
            .combined_bound(ConstraintType::Sum)
            .map(|(lo, hi)| SumBound::new(lo, hi));

        let counts = ConstraintType::ALL
            .iter()
            .filter_map(|&constraint| {
                let members = match constraint {
                    ConstraintType::Repeats => reference.unwrap_or(NumberMask::EMPTY),
                    _ => constraint.member_mask()?,
                };
                let (lo, hi) = filters.combined_bound(constraint)?;
                Some(CountBound::new(constraint, members, lo, hi))
            })
            .collect();

        Self { sum, counts }
    }

    pub(crate) fn count_bounds(&self) -> &[CountBound] {
        &self.counts
    }

    pub(crate) fn is_feasible(&self, node: &Node) -> bool {
        let remaining = node.remaining();
        if u32::from(MAX_NUMBER - node.last) < remaining {
            return false;
        }
        if let Some(sum) = &self.sum {
            if !sum.is_feasible(node.sum, node.last, remaining) {
                return false;
            }
        }
        self.counts
            .iter()
            .zip(node.counts)
            .all(|(bound, count)| bound.is_feasible(u32::from(count), node.last, remaining))
    }
}

/// Prunes partial tickets that must end up too close to an accepted one.
///
/// Shared counts only grow as numbers are added, and at least
/// `remaining - (numbers above last outside the accepted ticket)` more are
/// forced.
pub(crate) fn is_diverse_feasible(
    node: &Node,
    accepted: &[NumberMask],
    threshold: u32,
) -> bool {
    let remaining = node.remaining();
    let above = NumberMask::above(node.last);
    accepted.iter().all(|&taken| {
        let outside = above.len() - above.intersect_count(taken);
        let shared = node.mask.intersect_count(taken) + remaining.saturating_sub(outside);
        shared < threshold
    })
}
