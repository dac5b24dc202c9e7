//! Scholarship selection scoring and ranking.
//!
//! One batch flows strictly one direction: criteria registry plus raw
//! applicant rows feed the score mapper, whose discrete matrix is normalized
//! per benefit/cost column and collapsed into weighted, densely ranked
//! results with a recommendation cutoff. Every stage consumes immutable
//! input and produces a new immutable structure.

pub mod criteria;
pub mod domain;
pub mod matrix;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod sink;
pub mod views;

#[cfg(test)]
mod tests;

pub use criteria::{CriteriaError, CriteriaRegistry, CriterionRow};
pub use domain::{
    Applicant, ApplicantId, AttributeKind, Criterion, CriterionCode, CriterionKind, PeriodId,
    PeriodSnapshot, RankedResult, ValidationStatus,
};
pub use matrix::{ColumnSpec, MatrixRow, ScoreMatrix};
pub use normalize::normalize;
pub use pipeline::{
    SelectionConfig, SelectionError, SelectionOutcome, SelectionPipeline,
    DEFAULT_WEIGHT_TOLERANCE,
};
pub use ranking::{rank, EmptyBatchError};
pub use scoring::{
    ExclusionReport, LadderStep, MissingAttributePolicy, ScoreLadder, ScoreMapper, ScoringError,
    Threshold, DISCRETE_SCALE,
};
pub use sink::{ResultSink, SinkError};
pub use views::{RankedResultView, ResultRecord};
