//! CSV snapshot intake for criteria definitions and applicant batches.
//!
//! Stands in for the external data source: each importer reads one
//! consistent snapshot per call and hands immutable rows to the selection
//! pipeline. Administrative filtering happens here (only rows marked
//! `valid` are forwarded), while scoring-level exclusions stay with the
//! score mapper.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::selection::{
    Applicant, AttributeKind, CriterionRow, ValidationStatus,
};

#[derive(Debug)]
pub enum IntakeError {
    Io(std::io::Error),
    Csv(csv::Error),
    Record { line: usize, message: String },
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::Io(err) => write!(f, "failed to read snapshot: {}", err),
            IntakeError::Csv(err) => write!(f, "invalid snapshot CSV data: {}", err),
            IntakeError::Record { line, message } => {
                write!(f, "invalid snapshot row at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Io(err) => Some(err),
            IntakeError::Csv(err) => Some(err),
            IntakeError::Record { .. } => None,
        }
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads criterion definition snapshots. Field-level validation is left to
/// the criteria registry so configuration errors carry registry context.
pub struct CriteriaSnapshotImporter;

impl CriteriaSnapshotImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CriterionRow>, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CriterionRow>, IntakeError> {
        Ok(parser::parse_criterion_rows(reader)?)
    }
}

/// An applicant batch ready for the pipeline, plus the count of rows the
/// administration had not validated (those never reach scoring).
#[derive(Debug, Clone)]
pub struct ApplicantBatch {
    pub applicants: Vec<Applicant>,
    pub skipped_invalid: usize,
}

/// Reads applicant snapshots, keeping batch order.
pub struct ApplicantSnapshotImporter;

impl ApplicantSnapshotImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ApplicantBatch, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ApplicantBatch, IntakeError> {
        let rows = parser::parse_applicant_rows(reader)?;

        let mut applicants = Vec::with_capacity(rows.len());
        let mut skipped_invalid = 0usize;

        for (index, row) in rows.into_iter().enumerate() {
            // header occupies line 1
            let line = index + 2;

            let id = row.id.ok_or_else(|| IntakeError::Record {
                line,
                message: "missing or non-numeric `id`".to_string(),
            })?;
            let name = row.name.clone().ok_or_else(|| IntakeError::Record {
                line,
                message: "missing `name`".to_string(),
            })?;

            let status_cell = row.validation_status.as_deref().unwrap_or("");
            let status =
                ValidationStatus::parse(status_cell).ok_or_else(|| IntakeError::Record {
                    line,
                    message: format!("unknown validation status `{}`", status_cell),
                })?;
            if status != ValidationStatus::Valid {
                skipped_invalid += 1;
                continue;
            }

            let mut applicant = Applicant::new(id, name);
            let cells = [
                (AttributeKind::HouseholdIncome, row.household_income.as_deref()),
                (AttributeKind::ClassRank, row.class_rank.as_deref()),
                (AttributeKind::DependentsCount, row.dependents_count.as_deref()),
                (AttributeKind::HouseArea, row.house_area.as_deref()),
                (AttributeKind::AverageGrade, row.average_grade.as_deref()),
            ];
            for (kind, cell) in cells {
                if let Some(value) = parser::numeric_cell(cell) {
                    applicant = applicant.with_attribute(kind, value);
                }
            }

            applicants.push(applicant);
        }

        Ok(ApplicantBatch {
            applicants,
            skipped_invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const APPLICANT_HEADER: &str =
        "id,name,validation_status,household_income,class_rank,dependents_count,house_area,average_grade\n";

    #[test]
    fn criteria_snapshot_parses_rows_in_order() {
        let csv = "code,attribute,kind,weight\n\
C1,household_income,benefit,0.30\n\
C2,class_rank,benefit,0.20\n";
        let rows = CriteriaSnapshotImporter::from_reader(Cursor::new(csv)).expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code.as_deref(), Some("C1"));
        assert_eq!(rows[1].attribute.as_deref(), Some("class_rank"));
        assert_eq!(rows[1].weight, Some(0.20));
    }

    #[test]
    fn criteria_snapshot_keeps_missing_fields_for_registry_diagnostics() {
        let csv = "code,attribute,kind,weight\nC1,household_income,benefit,\n";
        let rows = CriteriaSnapshotImporter::from_reader(Cursor::new(csv)).expect("parse");
        assert_eq!(rows[0].weight, None);
    }

    #[test]
    fn applicant_snapshot_filters_unvalidated_rows() {
        let csv = format!(
            "{APPLICANT_HEADER}\
1,Ayu,valid,450000,4,3,45,88\n\
2,Budi,pending,900000,8,2,60,75\n\
3,Citra,rejected,700000,2,4,30,92\n"
        );
        let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(csv)).expect("parse");
        assert_eq!(batch.applicants.len(), 1);
        assert_eq!(batch.skipped_invalid, 2);
        assert_eq!(batch.applicants[0].name, "Ayu");
        assert_eq!(
            batch.applicants[0].attribute(AttributeKind::HouseholdIncome),
            Some(450_000.0)
        );
    }

    #[test]
    fn applicant_snapshot_turns_unparseable_cells_into_missing_attributes() {
        let csv = format!("{APPLICANT_HEADER}1,Ayu,valid,450000,four,3,45,88\n");
        let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(csv)).expect("parse");
        let applicant = &batch.applicants[0];
        assert_eq!(applicant.attribute(AttributeKind::ClassRank), None);
        assert_eq!(applicant.attribute(AttributeKind::HouseArea), Some(45.0));
    }

    #[test]
    fn applicant_snapshot_defaults_empty_status_to_pending() {
        let csv = format!("{APPLICANT_HEADER}1,Ayu,,450000,4,3,45,88\n");
        let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(csv)).expect("parse");
        assert!(batch.applicants.is_empty());
        assert_eq!(batch.skipped_invalid, 1);
    }

    #[test]
    fn applicant_snapshot_rejects_unknown_status() {
        let csv = format!("{APPLICANT_HEADER}1,Ayu,maybe,450000,4,3,45,88\n");
        let error =
            ApplicantSnapshotImporter::from_reader(Cursor::new(csv)).expect_err("unknown status");
        match error {
            IntakeError::Record { line, .. } => assert_eq!(line, 2),
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn applicant_snapshot_rejects_missing_id() {
        let csv = format!("{APPLICANT_HEADER},Ayu,valid,450000,4,3,45,88\n");
        let error =
            ApplicantSnapshotImporter::from_reader(Cursor::new(csv)).expect_err("missing id");
        match error {
            IntakeError::Record { line, .. } => assert_eq!(line, 2),
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = ApplicantSnapshotImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        match error {
            IntakeError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
