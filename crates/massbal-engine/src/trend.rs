//! Batch evaluation of trend studies.
//!
//! Every timepoint is an independent sample, so the series is evaluated in
//! parallel. Output rows come back in study order regardless of which
//! worker finished first, and the earliest timepoint's error wins when
//! several are invalid.

use rayon::prelude::*;

use massbal_core::{EvaluateError, Evaluator, TrendRow, TrendStudy};

use crate::MassBalanceEvaluator;

impl MassBalanceEvaluator {
    /// Evaluate every timepoint of a study into trend-table rows
    pub fn evaluate_study(&self, study: &TrendStudy) -> Result<Vec<TrendRow>, EvaluateError> {
        let rows: Vec<Result<TrendRow, EvaluateError>> = study
            .points
            .par_iter()
            .map(|point| {
                self.evaluate(&point.sample).map(|result| TrendRow {
                    day: point.day,
                    smb: result.smb,
                    amb: result.amb,
                    lk_imb: result.lk_imb,
                    status: result.status,
                })
            })
            .collect();

        rows.into_iter().collect()
    }
}
