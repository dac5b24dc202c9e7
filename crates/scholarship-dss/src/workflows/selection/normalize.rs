use super::domain::CriterionKind;
use super::matrix::{MatrixRow, ScoreMatrix};

/// Rescale every criterion column of a raw score matrix into [0, 1] according
/// to its benefit/cost kind. Min/max are computed once per column over the
/// current batch only; normalization is always batch-relative.
///
/// Benefit columns divide by the column maximum; an all-zero column stays at
/// zero. Cost columns divide the column's minimum nonzero value by each raw
/// value, and a raw zero normalizes to 1 when the column minimum is 0, else
/// to 0. The zero handling is asymmetric with the benefit rule on purpose:
/// it reproduces the historical behavior of the upstream system, and
/// changing it would change historical rankings.
pub fn normalize(matrix: &ScoreMatrix) -> ScoreMatrix {
    let factors: Vec<ColumnStats> = (0..matrix.columns().len())
        .map(|column| ColumnStats::collect(matrix, column))
        .collect();

    let rows = matrix
        .rows()
        .iter()
        .map(|row| MatrixRow {
            applicant_id: row.applicant_id,
            name: row.name.clone(),
            scores: row
                .scores
                .iter()
                .zip(matrix.columns())
                .zip(&factors)
                .map(|((&raw, spec), stats)| match spec.kind {
                    CriterionKind::Benefit => stats.normalize_benefit(raw),
                    CriterionKind::Cost => stats.normalize_cost(raw),
                })
                .collect(),
        })
        .collect();

    matrix.with_rows(rows)
}

#[derive(Debug, Clone, Copy)]
struct ColumnStats {
    max: f64,
    min: f64,
    min_nonzero: Option<f64>,
}

impl ColumnStats {
    fn collect(matrix: &ScoreMatrix, column: usize) -> Self {
        let mut max = 0.0f64;
        let mut min = f64::INFINITY;
        let mut min_nonzero: Option<f64> = None;

        for value in matrix.column_values(column) {
            max = max.max(value);
            min = min.min(value);
            if value > 0.0 {
                min_nonzero = Some(match min_nonzero {
                    Some(current) => current.min(value),
                    None => value,
                });
            }
        }

        Self {
            max,
            min,
            min_nonzero,
        }
    }

    fn normalize_benefit(self, raw: f64) -> f64 {
        if self.max > 0.0 {
            raw / self.max
        } else {
            0.0
        }
    }

    fn normalize_cost(self, raw: f64) -> f64 {
        if raw > 0.0 {
            match self.min_nonzero {
                Some(min_nonzero) => min_nonzero / raw,
                None => 0.0,
            }
        } else if self.min == 0.0 {
            1.0
        } else {
            0.0
        }
    }
}
