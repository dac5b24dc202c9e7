use tracing::{debug, info, warn};

use super::criteria::{CriteriaError, CriteriaRegistry, CriterionRow};
use super::domain::{Applicant, PeriodSnapshot, RankedResult};
use super::normalize::normalize;
use super::ranking::{rank, EmptyBatchError};
use super::scoring::{ExclusionReport, MissingAttributePolicy, ScoreMapper, ScoringError};
use super::views::{RankedResultView, ResultRecord};
use crate::config::DEFAULT_RECOMMENDATION_QUOTA;

/// Default tolerance for the weight-sum precondition.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-6;

/// Per-run settings. Explicit configuration rather than module state so
/// multiple periods can be computed independently.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub period: PeriodSnapshot,
    pub recommendation_quota: usize,
    pub weight_tolerance: f64,
    pub missing_attribute_policy: MissingAttributePolicy,
}

impl SelectionConfig {
    pub fn for_period(period: PeriodSnapshot) -> Self {
        Self {
            period,
            recommendation_quota: DEFAULT_RECOMMENDATION_QUOTA,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            missing_attribute_policy: MissingAttributePolicy::default(),
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.recommendation_quota = quota;
        self
    }

    pub fn with_missing_attribute_policy(mut self, policy: MissingAttributePolicy) -> Self {
        self.missing_attribute_policy = policy;
        self
    }
}

/// Error raised by a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    EmptyBatch(#[from] EmptyBatchError),
}

/// Runs the stages in order over one immutable batch: criteria validation,
/// discrete scoring, normalization, weighted ranking. Performs no I/O; rows
/// arrive already fetched and projections leave for the caller to persist.
pub struct SelectionPipeline {
    mapper: ScoreMapper,
    config: SelectionConfig,
}

impl SelectionPipeline {
    /// Pipeline using the reference ladder table.
    pub fn new(config: SelectionConfig) -> Self {
        Self::with_mapper(ScoreMapper::standard(), config)
    }

    pub fn with_mapper(mapper: ScoreMapper, config: SelectionConfig) -> Self {
        Self { mapper, config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn run(
        &self,
        criteria_rows: &[CriterionRow],
        applicants: &[Applicant],
    ) -> Result<SelectionOutcome, SelectionError> {
        let registry = CriteriaRegistry::load(criteria_rows, self.config.weight_tolerance)?;
        info!(
            period = %self.config.period.id,
            criteria = registry.len(),
            applicants = applicants.len(),
            "starting selection run"
        );

        let (raw, excluded) = self.mapper.score_batch(
            &registry,
            applicants,
            self.config.missing_attribute_policy,
        )?;
        for exclusion in &excluded {
            warn!(
                applicant = %exclusion.applicant_id,
                attribute = %exclusion.attribute,
                "excluding applicant with incomplete record"
            );
        }

        let normalized = normalize(&raw);
        debug!(rows = normalized.len(), "normalized score matrix");

        let rankings = rank(&normalized, self.config.recommendation_quota, excluded.len())?;
        info!(
            ranked = rankings.len(),
            excluded = excluded.len(),
            "selection run complete"
        );

        Ok(SelectionOutcome {
            period: self.config.period.clone(),
            rankings,
            excluded,
        })
    }
}

/// Owned output of one run: the ranked set plus the exclusions that explain
/// any gap between input and ranked row counts. An `Ok` outcome with
/// exclusions is a partial result with warnings, distinct from the
/// empty-batch error.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub period: PeriodSnapshot,
    pub rankings: Vec<RankedResult>,
    pub excluded: Vec<ExclusionReport>,
}

impl SelectionOutcome {
    /// Full detail projection in rank order, suitable for display.
    pub fn detail_views(&self) -> Vec<RankedResultView> {
        self.rankings.iter().map(RankedResult::to_view).collect()
    }

    /// Reduced projection in rank order, tagged with the period and an unset
    /// publish flag, suitable for handing to the external sink.
    pub fn persistence_rows(&self) -> Vec<ResultRecord> {
        self.rankings
            .iter()
            .map(|result| result.to_record(self.period.id))
            .collect()
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    pub fn recommended_count(&self) -> usize {
        self.rankings.iter().filter(|result| result.recommended).count()
    }
}
