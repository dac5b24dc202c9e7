use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use scholarship_dss::config::AppConfig;
use scholarship_dss::error::AppError;
use scholarship_dss::workflows::intake::{ApplicantSnapshotImporter, CriteriaSnapshotImporter};
use scholarship_dss::workflows::selection::{
    MissingAttributePolicy, PeriodId, PeriodSnapshot, ResultSink, SelectionConfig,
    SelectionOutcome, SelectionPipeline,
};

use crate::infra::JsonFileSink;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Criteria snapshot CSV (code,attribute,kind,weight)
    #[arg(long)]
    pub(crate) criteria: PathBuf,
    /// Applicant snapshot CSV
    #[arg(long)]
    pub(crate) applicants: PathBuf,
    /// Selection period identifier (defaults to APP_PERIOD_ID)
    #[arg(long)]
    pub(crate) period: Option<i64>,
    /// Human-readable period label for the report header
    #[arg(long)]
    pub(crate) period_label: Option<String>,
    /// First day of the period (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) opens_on: Option<NaiveDate>,
    /// Last day of the period (YYYY-MM-DD, defaults to opens-on)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) closes_on: Option<NaiveDate>,
    /// Recommendation quota (defaults to APP_RECOMMENDATION_QUOTA)
    #[arg(long)]
    pub(crate) quota: Option<usize>,
    /// Abort the whole batch on the first incomplete record
    #[arg(long)]
    pub(crate) strict: bool,
    /// Emit both projections as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
    /// Write the persistence rows to this JSON file
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_rank(args: RankArgs, defaults: &AppConfig) -> Result<(), AppError> {
    let RankArgs {
        criteria,
        applicants,
        period,
        period_label,
        opens_on,
        closes_on,
        quota,
        strict,
        json,
        out,
    } = args;

    let opens_on = opens_on.unwrap_or_else(|| Local::now().date_naive());
    let period = PeriodSnapshot {
        id: PeriodId(period.unwrap_or(defaults.selection.period_id)),
        label: period_label.unwrap_or_else(|| format!("period opened {opens_on}")),
        opens_on,
        closes_on: closes_on.unwrap_or(opens_on),
    };

    let criteria_rows = CriteriaSnapshotImporter::from_path(criteria)?;
    let batch = ApplicantSnapshotImporter::from_path(applicants)?;
    info!(
        criteria = criteria_rows.len(),
        applicants = batch.applicants.len(),
        skipped_invalid = batch.skipped_invalid,
        "loaded snapshots"
    );

    let mut config = SelectionConfig::for_period(period)
        .with_quota(quota.unwrap_or(defaults.selection.recommendation_quota));
    if strict {
        config = config.with_missing_attribute_policy(MissingAttributePolicy::FailBatch);
    }

    let outcome = SelectionPipeline::new(config).run(&criteria_rows, &batch.applicants)?;

    if json {
        render_json(&outcome, batch.skipped_invalid)?;
    } else {
        render_table(&outcome, batch.skipped_invalid);
    }

    if let Some(path) = out {
        let sink = JsonFileSink::new(path.clone());
        sink.replace_period(outcome.period.id, &outcome.persistence_rows())?;
        info!(path = %path.display(), "persistence rows written");
    }

    Ok(())
}

pub(crate) fn render_json(
    outcome: &SelectionOutcome,
    skipped_invalid: usize,
) -> Result<(), AppError> {
    let payload = json!({
        "period": outcome.period,
        "rankings": outcome.detail_views(),
        "persistence": outcome.persistence_rows(),
        "excluded": outcome.excluded,
        "skipped_invalid": skipped_invalid,
    });
    let rendered = serde_json::to_string_pretty(&payload)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_table(outcome: &SelectionOutcome, skipped_invalid: usize) {
    println!(
        "Ranking for period {} ({})",
        outcome.period.id, outcome.period.label
    );
    println!("{:>4}  {:>6}  {:<24}  {:>7}  {}", "rank", "id", "name", "score", "recommended");
    for view in outcome.detail_views() {
        println!(
            "{:>4}  {:>6}  {:<24}  {:>7.4}  {}",
            view.rank,
            view.applicant_id,
            view.name,
            view.final_score,
            if view.recommended { "yes" } else { "no" }
        );
    }

    if !outcome.excluded.is_empty() {
        println!("\nExcluded for incomplete records:");
        for exclusion in &outcome.excluded {
            println!(
                "  {} {} (missing {})",
                exclusion.applicant_id, exclusion.name, exclusion.attribute
            );
        }
    }
    if skipped_invalid > 0 {
        println!("\nSkipped {skipped_invalid} row(s) not yet validated.");
    }
}
