use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for applicant registration rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ApplicantId(pub i64);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for a selection period (one scholarship round).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PeriodId(pub i64);

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short stable criterion identifier, e.g. "C1"; unique within a batch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CriterionCode(pub String);

impl CriterionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of applicant attributes the scoring rubric may read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    HouseholdIncome,
    ClassRank,
    DependentsCount,
    HouseArea,
    AverageGrade,
}

impl AttributeKind {
    pub const fn label(self) -> &'static str {
        match self {
            AttributeKind::HouseholdIncome => "household_income",
            AttributeKind::ClassRank => "class_rank",
            AttributeKind::DependentsCount => "dependents_count",
            AttributeKind::HouseArea => "house_area",
            AttributeKind::AverageGrade => "average_grade",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "household_income" => Some(Self::HouseholdIncome),
            "class_rank" => Some(Self::ClassRank),
            "dependents_count" => Some(Self::DependentsCount),
            "house_area" => Some(Self::HouseArea),
            "average_grade" => Some(Self::AverageGrade),
            _ => None,
        }
    }

    pub const fn ordered() -> [Self; 5] {
        [
            Self::HouseholdIncome,
            Self::ClassRank,
            Self::DependentsCount,
            Self::HouseArea,
            Self::AverageGrade,
        ]
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Benefit criteria reward larger normalized values, cost criteria smaller
/// ones. This is a separate axis from the threshold ladders: a ladder may
/// already invert a raw attribute (low income scores high) and still belong
/// to a benefit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    Benefit,
    Cost,
}

impl CriterionKind {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionKind::Benefit => "benefit",
            CriterionKind::Cost => "cost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "benefit" => Some(Self::Benefit),
            "cost" => Some(Self::Cost),
            _ => None,
        }
    }
}

/// A validated criterion definition; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub code: CriterionCode,
    pub attribute: AttributeKind,
    pub kind: CriterionKind,
    pub weight: f64,
}

/// Administrative validation state carried on applicant snapshot rows. Only
/// `Valid` rows enter the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Pending,
    Rejected,
}

impl ValidationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Pending => "pending",
            ValidationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "valid" => Some(Self::Valid),
            "" | "pending" => Some(Self::Pending),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// One applicant row in a batch; immutable input to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub attributes: BTreeMap<AttributeKind, f64>,
}

impl Applicant {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ApplicantId(id),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, kind: AttributeKind, value: f64) -> Self {
        self.attributes.insert(kind, value);
        self
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<f64> {
        self.attributes.get(&kind).copied()
    }
}

/// Identifies the scholarship round a batch belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub id: PeriodId,
    pub label: String,
    pub opens_on: NaiveDate,
    pub closes_on: NaiveDate,
}

/// Final per-applicant outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub final_score: f64,
    pub rank: u32,
    pub recommended: bool,
}
