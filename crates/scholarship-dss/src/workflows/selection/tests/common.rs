use chrono::NaiveDate;

use crate::workflows::selection::{
    Applicant, AttributeKind, ColumnSpec, CriterionCode, CriterionKind, CriterionRow, MatrixRow,
    PeriodId, PeriodSnapshot, ScoreMatrix, SelectionConfig,
};

pub(super) fn period() -> PeriodSnapshot {
    PeriodSnapshot {
        id: PeriodId(1),
        label: "2026 first-semester award".to_string(),
        opens_on: NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"),
        closes_on: NaiveDate::from_ymd_opt(2026, 2, 28).expect("valid date"),
    }
}

pub(super) fn config() -> SelectionConfig {
    SelectionConfig::for_period(period())
}

pub(super) fn criterion_row(code: &str, attribute: &str, kind: &str, weight: f64) -> CriterionRow {
    CriterionRow::new(code, attribute, kind, weight)
}

/// The reference configuration: the five canonical criteria with the
/// direction already encoded in their ladders, so every column is benefit.
pub(super) fn reference_criteria() -> Vec<CriterionRow> {
    vec![
        criterion_row("C1", "household_income", "benefit", 0.30),
        criterion_row("C2", "class_rank", "benefit", 0.15),
        criterion_row("C3", "dependents_count", "benefit", 0.20),
        criterion_row("C4", "house_area", "benefit", 0.15),
        criterion_row("C5", "average_grade", "benefit", 0.20),
    ]
}

pub(super) fn equal_weight_criteria() -> Vec<CriterionRow> {
    vec![
        criterion_row("C1", "household_income", "benefit", 0.20),
        criterion_row("C2", "class_rank", "benefit", 0.20),
        criterion_row("C3", "dependents_count", "benefit", 0.20),
        criterion_row("C4", "house_area", "benefit", 0.20),
        criterion_row("C5", "average_grade", "benefit", 0.20),
    ]
}

pub(super) fn applicant(
    id: i64,
    name: &str,
    income: f64,
    class_rank: f64,
    dependents: f64,
    house_area: f64,
    grade: f64,
) -> Applicant {
    Applicant::new(id, name)
        .with_attribute(AttributeKind::HouseholdIncome, income)
        .with_attribute(AttributeKind::ClassRank, class_rank)
        .with_attribute(AttributeKind::DependentsCount, dependents)
        .with_attribute(AttributeKind::HouseArea, house_area)
        .with_attribute(AttributeKind::AverageGrade, grade)
}

pub(super) fn column(code: &str, kind: CriterionKind, weight: f64) -> ColumnSpec {
    ColumnSpec {
        code: CriterionCode::new(code),
        kind,
        weight,
    }
}

/// Build a matrix directly from per-applicant score rows, bypassing the
/// mapper, for normalizer and ranker unit tests.
pub(super) fn matrix_of(columns: Vec<ColumnSpec>, rows: &[(i64, &str, &[f64])]) -> ScoreMatrix {
    let mut matrix = ScoreMatrix::new(columns);
    for (id, name, scores) in rows {
        matrix.push_row(MatrixRow {
            applicant_id: crate::workflows::selection::ApplicantId(*id),
            name: (*name).to_string(),
            scores: scores.to_vec(),
        });
    }
    matrix
}
