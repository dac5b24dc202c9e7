use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use scholarship_dss::workflows::selection::{PeriodId, ResultRecord, ResultSink, SinkError};

/// Sink keeping one row set per period in memory; handy for tests and the
/// demo command.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultSink {
    periods: Arc<Mutex<HashMap<PeriodId, Vec<ResultRecord>>>>,
}

impl ResultSink for InMemoryResultSink {
    fn replace_period(&self, period: PeriodId, rows: &[ResultRecord]) -> Result<(), SinkError> {
        let mut guard = self.periods.lock().expect("sink mutex poisoned");
        guard.insert(period, rows.to_vec());
        Ok(())
    }

    fn fetch_period(&self, period: PeriodId) -> Result<Vec<ResultRecord>, SinkError> {
        let guard = self.periods.lock().expect("sink mutex poisoned");
        Ok(guard.get(&period).cloned().unwrap_or_default())
    }
}

/// Sink writing one period's rows to a pretty-printed JSON file, replacing
/// the file wholesale on each call.
pub(crate) struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ResultSink for JsonFileSink {
    fn replace_period(&self, _period: PeriodId, rows: &[ResultRecord]) -> Result<(), SinkError> {
        let payload = serde_json::to_string_pretty(rows)
            .map_err(|err| SinkError::Rejected(err.to_string()))?;
        fs::write(&self.path, payload).map_err(|err| SinkError::Unavailable(err.to_string()))
    }

    fn fetch_period(&self, period: PeriodId) -> Result<Vec<ResultRecord>, SinkError> {
        let payload =
            fs::read_to_string(&self.path).map_err(|err| SinkError::Unavailable(err.to_string()))?;
        let rows: Vec<ResultRecord> =
            serde_json::from_str(&payload).map_err(|err| SinkError::Rejected(err.to_string()))?;
        Ok(rows.into_iter().filter(|row| row.period_id == period).collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
