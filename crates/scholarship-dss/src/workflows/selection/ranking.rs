use super::domain::RankedResult;
use super::matrix::ScoreMatrix;

/// Zero scoreable applicants remained after exclusion. Carries the exclusion
/// count so callers can tell "everything was excluded" apart from an empty
/// upstream fetch.
#[derive(Debug, thiserror::Error)]
#[error("no scoreable applicants remain after exclusions ({excluded} excluded)")]
pub struct EmptyBatchError {
    pub excluded: usize,
}

/// Collapse a normalized matrix into ranked results.
///
/// Final score is the weighted sum across columns. The sort is stable and
/// descending, so applicants tied on score keep their input batch order and
/// reruns over the same snapshot reproduce the same sequence. Ranks are
/// positions (dense, 1..N, never shared), and the first `min(quota, N)`
/// entries are flagged recommended.
pub fn rank(
    matrix: &ScoreMatrix,
    quota: usize,
    excluded: usize,
) -> Result<Vec<RankedResult>, EmptyBatchError> {
    if matrix.is_empty() {
        return Err(EmptyBatchError { excluded });
    }

    let mut totals: Vec<(usize, f64)> = matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let total = row
                .scores
                .iter()
                .zip(matrix.columns())
                .map(|(score, spec)| score * spec.weight)
                .sum::<f64>();
            (index, total)
        })
        .collect();

    totals.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    Ok(totals
        .into_iter()
        .enumerate()
        .map(|(position, (index, final_score))| {
            let row = &matrix.rows()[index];
            let rank = position as u32 + 1;
            RankedResult {
                applicant_id: row.applicant_id,
                name: row.name.clone(),
                final_score,
                rank,
                recommended: position < quota,
            }
        })
        .collect())
}
