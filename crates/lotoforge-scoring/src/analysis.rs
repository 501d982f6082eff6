//! Qualitative ticket analysis.
//!
//! Each metric is graded against its constraint type's bands:
//!
//! | status | condition | points |
//! |---|---|---|
//! | Excellent | inside the ideal band | 10 |
//! | Good | inside the acceptable band | 7 |
//! | Warning | within the warning margin of the acceptable band | 3 |
//! | Bad | anywhere else | 0 |
//!
//! The ticket score is `100 * points / (10 * evaluated)`, rounded to the
//! nearest integer. `Repeats` is only evaluated when a reference draw is
//! supplied.

use std::fmt;

use lotoforge_core::{ConstraintType, Ticket};

use crate::calculator::calculate;

/// Qualitative grade of a metric or of a whole ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Status {
    Bad,
    Warning,
    Good,
    Excellent,
}

impl Status {
    /// Points awarded for this grade.
    pub const fn points(self) -> u32 {
        match self {
            Status::Excellent => 10,
            Status::Good => 7,
            Status::Warning => 3,
            Status::Bad => 0,
        }
    }

    /// Grades a single metric value.
    pub fn classify(constraint: ConstraintType, value: u32) -> Self {
        let acceptable = constraint.acceptable_range();
        if constraint.ideal_range().contains(value) {
            Status::Excellent
        } else if acceptable.contains(value) {
            Status::Good
        } else if acceptable.distance(value) <= constraint.warning_margin() {
            Status::Warning
        } else {
            Status::Bad
        }
    }

    /// Grades a whole ticket from its 0-100 score.
    pub const fn from_score(score: u32) -> Self {
        match score {
            85.. => Status::Excellent,
            70..=84 => Status::Good,
            50..=69 => Status::Warning,
            _ => Status::Bad,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Excellent => "EXCELLENT",
            Status::Good => "GOOD",
            Status::Warning => "WARNING",
            Status::Bad => "BAD",
        };
        f.write_str(name)
    }
}

/// Grade of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintEvaluation {
    pub constraint: ConstraintType,
    pub value: u32,
    pub status: Status,
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TicketAnalysis {
    /// 0-100 score.
    pub score: u32,
    pub status: Status,
    /// One entry per evaluated constraint type, in evaluation order.
    pub evaluations: Vec<ConstraintEvaluation>,
}

impl TicketAnalysis {
    /// The result for a selection that is not a valid ticket.
    pub fn invalid() -> Self {
        Self {
            score: 0,
            status: Status::Bad,
            evaluations: Vec::new(),
        }
    }

    pub fn evaluation(&self, constraint: ConstraintType) -> Option<&ConstraintEvaluation> {
        self.evaluations.iter().find(|e| e.constraint == constraint)
    }
}

/// Grades a selection of numbers.
///
/// Anything other than 15 distinct numbers in `1..=25` yields
/// [`TicketAnalysis::invalid`] without evaluating any metric.
///
/// # Example
///
/// ```
/// use lotoforge_scoring::{analyze, Status};
///
/// let analysis = analyze(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14], None);
/// assert_eq!(analysis.score, 0);
/// assert_eq!(analysis.status, Status::Bad);
/// assert!(analysis.evaluations.is_empty());
/// ```
pub fn analyze(numbers: &[u8], reference: Option<&Ticket>) -> TicketAnalysis {
    let Ok(ticket) = Ticket::new(numbers.iter().copied()) else {
        return TicketAnalysis::invalid();
    };

    let metrics = calculate(&ticket, reference);
    let evaluations: Vec<ConstraintEvaluation> = metrics
        .iter()
        .filter(|(constraint, _)| !constraint.requires_history() || reference.is_some())
        .map(|(constraint, value)| ConstraintEvaluation {
            constraint,
            value,
            status: Status::classify(constraint, value),
        })
        .collect();

    let points: u32 = evaluations.iter().map(|e| e.status.points()).sum();
    let max_points = Status::Excellent.points() * evaluations.len() as u32;
    let score = (points * 100 + max_points / 2) / max_points;

    TicketAnalysis {
        score,
        status: Status::from_score(score),
        evaluations,
    }
}
