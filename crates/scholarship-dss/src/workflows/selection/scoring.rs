use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::criteria::{CriteriaError, CriteriaRegistry};
use super::domain::{Applicant, ApplicantId, AttributeKind, CriterionCode};
use super::matrix::{ColumnSpec, MatrixRow, ScoreMatrix};

/// A single threshold predicate over a raw attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    AtMost(f64),
    LessThan(f64),
    AtLeast(f64),
    GreaterThan(f64),
    EqualTo(f64),
}

impl Threshold {
    pub fn matches(self, value: f64) -> bool {
        match self {
            Threshold::AtMost(limit) => value <= limit,
            Threshold::LessThan(limit) => value < limit,
            Threshold::AtLeast(limit) => value >= limit,
            Threshold::GreaterThan(limit) => value > limit,
            Threshold::EqualTo(expected) => value == expected,
        }
    }
}

/// One rung of a ladder: the first matching threshold decides the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderStep {
    pub threshold: Threshold,
    pub score: f64,
}

/// Ordered threshold ladder for one criterion. Ladders are evaluated top to
/// bottom and need not be exhaustive or mutually exclusive; evaluation order
/// is the tie-break, and a value matching no step scores 0.00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLadder {
    steps: Vec<LadderStep>,
}

impl ScoreLadder {
    pub fn new(steps: Vec<LadderStep>) -> Self {
        Self { steps }
    }

    /// Convenience for the common four-rung shape sharing the discrete scale.
    pub fn descending(thresholds: [Threshold; 4]) -> Self {
        let steps = thresholds
            .into_iter()
            .zip(DISCRETE_SCALE)
            .map(|(threshold, score)| LadderStep { threshold, score })
            .collect();
        Self { steps }
    }

    pub fn score(&self, value: f64) -> f64 {
        self.steps
            .iter()
            .find(|step| step.threshold.matches(value))
            .map(|step| step.score)
            .unwrap_or(0.0)
    }

    pub fn steps(&self) -> &[LadderStep] {
        &self.steps
    }
}

/// The discrete scores a ladder may assign, best first. A fifth implicit
/// outcome, 0.00, covers values matching no rung.
pub const DISCRETE_SCALE: [f64; 4] = [1.00, 0.75, 0.50, 0.25];

/// How the mapper treats an applicant lacking a required attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAttributePolicy {
    /// Exclude the row from the batch and report it; remaining applicants
    /// are ranked among themselves.
    #[default]
    ExcludeRow,
    /// Fail the whole computation on the first incomplete row.
    FailBatch,
}

/// Record of an applicant dropped before scoring, returned alongside results
/// so partial batches are never a silent drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExclusionReport {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub attribute: AttributeKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
    #[error("applicant {id} ({name}) is missing required attribute `{attribute}`")]
    IncompleteRecord {
        id: ApplicantId,
        name: String,
        attribute: AttributeKind,
    },
}

/// Maps raw attribute values to discrete scores through per-criterion
/// threshold ladders. Dispatch is a table keyed by criterion code, so adding
/// a criterion means adding a ladder entry, not new branching code.
#[derive(Debug, Clone)]
pub struct ScoreMapper {
    ladders: BTreeMap<CriterionCode, ScoreLadder>,
}

impl ScoreMapper {
    pub fn new(ladders: BTreeMap<CriterionCode, ScoreLadder>) -> Self {
        Self { ladders }
    }

    /// The reference rule set: five criteria scored on the shared discrete
    /// scale. C1/C2 ladders invert their attribute (lower raw is better)
    /// while C5 rewards higher grades; the benefit/cost flag applied later in
    /// the normalizer is an independent axis.
    pub fn standard() -> Self {
        let mut ladders = BTreeMap::new();
        ladders.insert(
            CriterionCode::new("C1"),
            ScoreLadder::descending([
                Threshold::AtMost(500_000.0),
                Threshold::AtMost(1_000_000.0),
                Threshold::AtMost(1_500_000.0),
                Threshold::AtMost(2_000_000.0),
            ]),
        );
        ladders.insert(
            CriterionCode::new("C2"),
            ScoreLadder::descending([
                Threshold::AtMost(5.0),
                Threshold::AtMost(10.0),
                Threshold::AtMost(15.0),
                Threshold::AtMost(20.0),
            ]),
        );
        ladders.insert(
            CriterionCode::new("C3"),
            ScoreLadder::descending([
                Threshold::AtLeast(5.0),
                Threshold::EqualTo(4.0),
                Threshold::EqualTo(3.0),
                Threshold::EqualTo(2.0),
            ]),
        );
        ladders.insert(
            CriterionCode::new("C4"),
            ScoreLadder::descending([
                Threshold::LessThan(36.0),
                Threshold::AtMost(54.0),
                Threshold::AtMost(70.0),
                Threshold::AtMost(100.0),
            ]),
        );
        ladders.insert(
            CriterionCode::new("C5"),
            ScoreLadder::descending([
                Threshold::GreaterThan(90.0),
                Threshold::GreaterThan(80.0),
                Threshold::GreaterThan(70.0),
                Threshold::GreaterThan(40.0),
            ]),
        );
        Self { ladders }
    }

    pub fn with_ladder(mut self, code: CriterionCode, ladder: ScoreLadder) -> Self {
        self.ladders.insert(code, ladder);
        self
    }

    pub fn ladder(&self, code: &CriterionCode) -> Option<&ScoreLadder> {
        self.ladders.get(code)
    }

    /// Build the raw score matrix for a batch. Column order follows the
    /// registry; row order follows the input batch. Incomplete rows are
    /// excluded or fail the batch per `policy`.
    pub fn score_batch(
        &self,
        registry: &CriteriaRegistry,
        applicants: &[Applicant],
        policy: MissingAttributePolicy,
    ) -> Result<(ScoreMatrix, Vec<ExclusionReport>), ScoringError> {
        let columns: Vec<ColumnSpec> = registry
            .iter()
            .map(|criterion| ColumnSpec {
                code: criterion.code.clone(),
                kind: criterion.kind,
                weight: criterion.weight,
            })
            .collect();

        let mut ladders: Vec<&ScoreLadder> = Vec::with_capacity(registry.len());
        for criterion in registry.iter() {
            let ladder =
                self.ladders
                    .get(&criterion.code)
                    .ok_or_else(|| CriteriaError::MissingLadder {
                        code: criterion.code.as_str().to_string(),
                    })?;
            ladders.push(ladder);
        }

        let mut matrix = ScoreMatrix::new(columns);
        let mut excluded = Vec::new();

        'applicants: for applicant in applicants {
            let mut scores = Vec::with_capacity(registry.len());
            for (criterion, ladder) in registry.iter().zip(&ladders) {
                let value = match applicant.attribute(criterion.attribute) {
                    Some(value) => value,
                    None => match policy {
                        MissingAttributePolicy::ExcludeRow => {
                            excluded.push(ExclusionReport {
                                applicant_id: applicant.id,
                                name: applicant.name.clone(),
                                attribute: criterion.attribute,
                            });
                            continue 'applicants;
                        }
                        MissingAttributePolicy::FailBatch => {
                            return Err(ScoringError::IncompleteRecord {
                                id: applicant.id,
                                name: applicant.name.clone(),
                                attribute: criterion.attribute,
                            });
                        }
                    },
                };

                scores.push(ladder.score(value));
            }

            matrix.push_row(MatrixRow {
                applicant_id: applicant.id,
                name: applicant.name.clone(),
                scores,
            });
        }

        Ok((matrix, excluded))
    }
}
