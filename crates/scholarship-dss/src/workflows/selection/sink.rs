use super::domain::PeriodId;
use super::views::ResultRecord;

/// Storage abstraction for computed rankings so the pipeline can be exercised
/// without a database. Implementations must give `replace_period`
/// full-replace semantics: prior rows for the period are superseded, never
/// merged.
pub trait ResultSink: Send + Sync {
    fn replace_period(&self, period: PeriodId, rows: &[ResultRecord]) -> Result<(), SinkError>;
    fn fetch_period(&self, period: PeriodId) -> Result<Vec<ResultRecord>, SinkError>;
}

/// Error enumeration for sink failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("result sink unavailable: {0}")]
    Unavailable(String),
    #[error("result sink rejected batch: {0}")]
    Rejected(String),
}
