use chrono::Local;
use clap::Args;
use std::io::Cursor;
use tracing::info;

use scholarship_dss::config::AppConfig;
use scholarship_dss::error::AppError;
use scholarship_dss::workflows::intake::{ApplicantSnapshotImporter, CriteriaSnapshotImporter};
use scholarship_dss::workflows::selection::{
    PeriodId, PeriodSnapshot, ResultSink, SelectionConfig, SelectionPipeline,
};

use crate::infra::InMemoryResultSink;
use crate::rank::{render_json, render_table};

const SAMPLE_CRITERIA: &str = "\
code,attribute,kind,weight
C1,household_income,benefit,0.30
C2,class_rank,benefit,0.15
C3,dependents_count,benefit,0.20
C4,house_area,benefit,0.15
C5,average_grade,benefit,0.20
";

const SAMPLE_APPLICANTS: &str = "\
id,name,validation_status,household_income,class_rank,dependents_count,house_area,average_grade
101,Ayu Lestari,valid,450000,3,2,30,95
102,Budi Santoso,valid,1200000,12,4,60,85
103,Citra Dewi,valid,700000,2,4,40,92
104,Dian Pratama,pending,500000,1,5,20,99
105,Eka Putri,valid,2500000,25,1,120,35
106,Fajar Nugroho,valid,900000,8,3,50,
107,Gita Maharani,valid,350000,6,5,28,88
108,Hendra Wijaya,valid,1600000,14,2,80,72
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Recommendation quota for the sample run
    #[arg(long)]
    pub(crate) quota: Option<usize>,
    /// Emit both projections as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs, defaults: &AppConfig) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let period = PeriodSnapshot {
        id: PeriodId(defaults.selection.period_id),
        label: "sample scholarship round".to_string(),
        opens_on: today,
        closes_on: today,
    };

    let criteria = CriteriaSnapshotImporter::from_reader(Cursor::new(SAMPLE_CRITERIA))?;
    let batch = ApplicantSnapshotImporter::from_reader(Cursor::new(SAMPLE_APPLICANTS))?;

    let config = SelectionConfig::for_period(period)
        .with_quota(args.quota.unwrap_or(defaults.selection.recommendation_quota));
    let outcome = SelectionPipeline::new(config).run(&criteria, &batch.applicants)?;

    if args.json {
        render_json(&outcome, batch.skipped_invalid)?;
    } else {
        println!("Scholarship selection demo\n");
        render_table(&outcome, batch.skipped_invalid);
    }

    let sink = InMemoryResultSink::default();
    sink.replace_period(outcome.period.id, &outcome.persistence_rows())?;
    let stored = sink.fetch_period(outcome.period.id)?;
    info!(rows = stored.len(), "persistence projection handed to sink");

    Ok(())
}
