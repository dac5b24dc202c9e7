use serde::Deserialize;

use super::domain::{AttributeKind, Criterion, CriterionCode, CriterionKind};

/// Unvalidated criterion definition as delivered by the external criteria
/// source (CSV snapshot, admin UI export, ...). Field absence is represented
/// rather than rejected at parse time so the registry can report exactly
/// which field is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriterionRow {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl CriterionRow {
    pub fn new(code: &str, attribute: &str, kind: &str, weight: f64) -> Self {
        Self {
            code: Some(code.to_string()),
            attribute: Some(attribute.to_string()),
            kind: Some(kind.to_string()),
            weight: Some(weight),
        }
    }
}

/// Validation failure in the criteria configuration. All variants are fatal
/// to the run and surface before any scoring begins.
#[derive(Debug, thiserror::Error)]
pub enum CriteriaError {
    #[error("criteria source supplied no rows")]
    Empty,
    #[error("criterion row {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("criterion `{code}` declares unknown kind `{kind}`")]
    UnknownKind { code: String, kind: String },
    #[error("criterion `{code}` reads unknown attribute `{attribute}`")]
    UnknownAttribute { code: String, attribute: String },
    #[error("criterion code `{0}` appears more than once")]
    DuplicateCode(String),
    #[error("criterion `{code}` has negative weight {weight}")]
    NegativeWeight { code: String, weight: f64 },
    #[error("criterion weights sum to {sum} but must sum to 1 within ±{tolerance}")]
    WeightSum { sum: f64, tolerance: f64 },
    #[error("no threshold ladder is configured for criterion `{code}`")]
    MissingLadder { code: String },
}

/// Ordered, validated set of criteria for one batch. Source order is kept so
/// matrix columns and diagnostics stay deterministic; scoring itself is keyed
/// by code and order-independent.
#[derive(Debug, Clone)]
pub struct CriteriaRegistry {
    criteria: Vec<Criterion>,
}

impl CriteriaRegistry {
    /// Validate raw rows into a registry. Weights must be non-negative and
    /// sum to 1 within `weight_tolerance`; the registry never renormalizes,
    /// since doing so would silently change the meaning of final scores
    /// across periods.
    pub fn load(rows: &[CriterionRow], weight_tolerance: f64) -> Result<Self, CriteriaError> {
        if rows.is_empty() {
            return Err(CriteriaError::Empty);
        }

        let mut criteria: Vec<Criterion> = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let code = row
                .code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .ok_or(CriteriaError::MissingField {
                    index,
                    field: "code",
                })?;
            let attribute = row
                .attribute
                .as_deref()
                .map(str::trim)
                .filter(|attribute| !attribute.is_empty())
                .ok_or(CriteriaError::MissingField {
                    index,
                    field: "attribute",
                })?;
            let kind = row
                .kind
                .as_deref()
                .map(str::trim)
                .filter(|kind| !kind.is_empty())
                .ok_or(CriteriaError::MissingField {
                    index,
                    field: "kind",
                })?;
            let weight = row.weight.ok_or(CriteriaError::MissingField {
                index,
                field: "weight",
            })?;

            if criteria.iter().any(|existing| existing.code.as_str() == code) {
                return Err(CriteriaError::DuplicateCode(code.to_string()));
            }

            let attribute =
                AttributeKind::parse(attribute).ok_or_else(|| CriteriaError::UnknownAttribute {
                    code: code.to_string(),
                    attribute: attribute.to_string(),
                })?;
            let kind = CriterionKind::parse(kind).ok_or_else(|| CriteriaError::UnknownKind {
                code: code.to_string(),
                kind: kind.to_string(),
            })?;

            if weight < 0.0 || !weight.is_finite() {
                return Err(CriteriaError::NegativeWeight {
                    code: code.to_string(),
                    weight,
                });
            }

            criteria.push(Criterion {
                code: CriterionCode::new(code),
                attribute,
                kind,
                weight,
            });
        }

        let sum: f64 = criteria.iter().map(|criterion| criterion.weight).sum();
        if (sum - 1.0).abs() > weight_tolerance {
            return Err(CriteriaError::WeightSum {
                sum,
                tolerance: weight_tolerance,
            });
        }

        Ok(Self { criteria })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn get(&self, code: &CriterionCode) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| &criterion.code == code)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
