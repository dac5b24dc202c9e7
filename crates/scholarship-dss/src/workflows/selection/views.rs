use serde::{Deserialize, Serialize};

use super::domain::{ApplicantId, PeriodId, RankedResult};

/// Display projection of one ranked applicant, score rounded for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResultView {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub final_score: f64,
    pub rank: u32,
    pub recommended: bool,
}

/// Persistence projection handed to the external sink, intended to be
/// upserted keyed by `(applicant_id, period_id)` with prior rows for the
/// period superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub applicant_id: ApplicantId,
    pub final_score: f64,
    pub rank: u32,
    pub recommended: bool,
    pub period_id: PeriodId,
    pub published: bool,
}

impl RankedResult {
    pub fn to_view(&self) -> RankedResultView {
        RankedResultView {
            applicant_id: self.applicant_id,
            name: self.name.clone(),
            final_score: round4(self.final_score),
            rank: self.rank,
            recommended: self.recommended,
        }
    }

    pub fn to_record(&self, period_id: PeriodId) -> ResultRecord {
        ResultRecord {
            applicant_id: self.applicant_id,
            final_score: round4(self.final_score),
            rank: self.rank,
            recommended: self.recommended,
            period_id,
            published: false,
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
