//! Turning findings into numbers: 0–5 criterion grades for display and the 100-point score.

pub mod aggregate;
pub mod criteria;

pub use aggregate::ScoreAggregator;
pub use criteria::{band, CriteriaGrader, CriterionKind};
