//! End-to-end specifications for the selection workflow: CSV snapshots in,
//! ranked projections out, exercised only through the public API.

use std::io::Cursor;

use chrono::NaiveDate;

use scholarship_dss::workflows::intake::{ApplicantSnapshotImporter, CriteriaSnapshotImporter};
use scholarship_dss::workflows::selection::{
    CriteriaError, PeriodId, PeriodSnapshot, SelectionConfig, SelectionError, SelectionPipeline,
};

const CRITERIA_CSV: &str = "\
code,attribute,kind,weight
C1,household_income,benefit,0.30
C2,class_rank,benefit,0.15
C3,dependents_count,benefit,0.20
C4,house_area,benefit,0.15
C5,average_grade,benefit,0.20
";

const APPLICANTS_CSV: &str = "\
id,name,validation_status,household_income,class_rank,dependents_count,house_area,average_grade
101,Ayu Lestari,valid,450000,3,2,30,95
102,Budi Santoso,valid,1200000,12,4,60,85
103,Citra Dewi,valid,700000,2,4,40,92
104,Dian Pratama,pending,500000,1,5,20,99
105,Eka Putri,valid,2500000,25,1,120,35
106,Fajar Nugroho,valid,900000,8,,50,
";

fn period() -> PeriodSnapshot {
    PeriodSnapshot {
        id: PeriodId(7),
        label: "2026 first-semester award".to_string(),
        opens_on: NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"),
        closes_on: NaiveDate::from_ymd_opt(2026, 2, 28).expect("valid date"),
    }
}

#[test]
fn csv_snapshot_flows_through_to_ranked_projections() {
    let criteria = CriteriaSnapshotImporter::from_reader(Cursor::new(CRITERIA_CSV))
        .expect("criteria snapshot parses");
    let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(APPLICANTS_CSV))
        .expect("applicant snapshot parses");

    // one pending row never reaches the engine
    assert_eq!(batch.skipped_invalid, 1);
    assert_eq!(batch.applicants.len(), 5);

    let pipeline = SelectionPipeline::new(SelectionConfig::for_period(period()).with_quota(3));
    let outcome = pipeline
        .run(&criteria, &batch.applicants)
        .expect("pipeline run");

    // Fajar is missing dependents_count and average_grade, so he is excluded
    // while the other four rank among themselves.
    assert_eq!(outcome.excluded_count(), 1);
    assert_eq!(outcome.excluded[0].applicant_id.0, 106);
    assert_eq!(outcome.rankings.len(), 4);

    let views = outcome.detail_views();
    assert_eq!(
        views.iter().map(|view| view.rank).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(views.iter().filter(|view| view.recommended).count(), 3);
    // scores are sorted descending
    for pair in views.windows(2) {
        assert!(pair[0].final_score >= pair[1].final_score);
    }

    let rows = outcome.persistence_rows();
    assert_eq!(rows.len(), 4);
    assert!(rows
        .iter()
        .all(|row| row.period_id == PeriodId(7) && !row.published));
}

#[test]
fn unchanged_snapshot_reruns_identically() {
    let criteria = CriteriaSnapshotImporter::from_reader(Cursor::new(CRITERIA_CSV))
        .expect("criteria snapshot parses");
    let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(APPLICANTS_CSV))
        .expect("applicant snapshot parses");
    let pipeline = SelectionPipeline::new(SelectionConfig::for_period(period()));

    let first = pipeline
        .run(&criteria, &batch.applicants)
        .expect("first run");
    let second = pipeline
        .run(&criteria, &batch.applicants)
        .expect("second run");

    assert_eq!(
        serde_json::to_string(&first.detail_views()).expect("serialize"),
        serde_json::to_string(&second.detail_views()).expect("serialize"),
    );
    assert_eq!(
        serde_json::to_string(&first.persistence_rows()).expect("serialize"),
        serde_json::to_string(&second.persistence_rows()).expect("serialize"),
    );
}

#[test]
fn malformed_criteria_snapshot_fails_before_scoring() {
    let criteria_csv = "\
code,attribute,kind,weight
C1,household_income,advantage,1.0
";
    let criteria = CriteriaSnapshotImporter::from_reader(Cursor::new(criteria_csv))
        .expect("criteria snapshot parses");
    let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(APPLICANTS_CSV))
        .expect("applicant snapshot parses");

    let error = SelectionPipeline::new(SelectionConfig::for_period(period()))
        .run(&criteria, &batch.applicants)
        .expect_err("unknown kind rejected");

    match error {
        SelectionError::Criteria(CriteriaError::UnknownKind { code, kind }) => {
            assert_eq!(code, "C1");
            assert_eq!(kind, "advantage");
        }
        other => panic!("expected unknown kind error, got {other:?}"),
    }
}

#[test]
fn unknown_attribute_name_is_rejected() {
    let criteria_csv = "\
code,attribute,kind,weight
C1,shoe_size,benefit,1.0
";
    let criteria = CriteriaSnapshotImporter::from_reader(Cursor::new(criteria_csv))
        .expect("criteria snapshot parses");

    let error = SelectionPipeline::new(SelectionConfig::for_period(period()))
        .run(&criteria, &[])
        .expect_err("unknown attribute rejected");

    match error {
        SelectionError::Criteria(CriteriaError::UnknownAttribute { attribute, .. }) => {
            assert_eq!(attribute, "shoe_size");
        }
        other => panic!("expected unknown attribute error, got {other:?}"),
    }
}
