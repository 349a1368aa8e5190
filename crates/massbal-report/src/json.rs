//! JSON evaluation records
//!
//! An `EvaluationRecord` bundles the inputs, the derived result and a
//! wall-clock stamp into one serializable unit — the shape stored in the
//! evaluation history and returned by `massbal evaluate --format json`.
//! Numeric fields survive a serialize/deserialize round trip bit-for-bit.

use chrono::{DateTime, Utc};
use massbal_core::{DerivedResult, RenderError, ReportRenderer, SampleInput};
use serde::{Deserialize, Serialize};

/// One stored evaluation: inputs, result, and when it was run.
///
/// The timestamp is presentation metadata; the engine itself never sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// When the evaluation was performed
    pub evaluated_at: DateTime<Utc>,
    /// The analytical inputs as entered
    pub sample: SampleInput,
    /// Everything the engine derived
    pub result: DerivedResult,
}

impl EvaluationRecord {
    /// Create a record stamped with the current time
    pub fn new(sample: SampleInput, result: DerivedResult) -> Self {
        Self::at(Utc::now(), sample, result)
    }

    /// Create a record with an explicit stamp (deterministic output)
    pub fn at(evaluated_at: DateTime<Utc>, sample: SampleInput, result: DerivedResult) -> Self {
        Self {
            evaluated_at,
            sample,
            result,
        }
    }
}

/// JSON report renderer
#[derive(Clone, Debug)]
pub struct JsonReporter {
    /// Pretty-print the output
    pub pretty: bool,
    /// Stamp to use instead of the current time
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self {
            pretty: true,
            timestamp: None,
        }
    }
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit compact JSON (single line, JSONL-friendly)
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Use a fixed timestamp instead of the current time
    pub fn timestamp(mut self, stamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(stamp);
        self
    }
}

impl ReportRenderer for JsonReporter {
    type Output = String;

    fn render(
        &self,
        sample: &SampleInput,
        result: &DerivedResult,
    ) -> Result<Self::Output, RenderError> {
        let record = EvaluationRecord::at(
            self.timestamp.unwrap_or_else(Utc::now),
            sample.clone(),
            result.clone(),
        );

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        };
        rendered.map_err(|e| RenderError::Format(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use massbal_core::{ComplianceStatus, DiagnosticKind, ReconciliationMethod};
    use pretty_assertions::assert_eq;

    fn fixture() -> EvaluationRecord {
        let result = DerivedResult {
            delta_api: 15.5,
            delta_deg: 4.4,
            degradation_level: 15.816_326_530_612_244,
            lambda_correction: 1.25,
            omega_correction: 2.0,
            corrected_deg: 12.25,
            smb: 87.4,
            amb: 88.730_964_467_005_07,
            rmb: 28.387_096_774_193_55,
            lk_imb: 96.683_673_469_387_75,
            confidence_index: 77.815_315_315_315_31,
            recommended_method: ReconciliationMethod::Rmb,
            recommended_value: 28.387_096_774_193_55,
            status: ComplianceStatus::Oos,
            diagnostic: DiagnosticKind::UvSilentImpurity,
        };
        EvaluationRecord::at(
            Utc.with_ymd_and_hms(2026, 8, 6, 9, 30, 0).unwrap(),
            SampleInput::template(),
            result,
        )
    }

    #[test]
    fn record_round_trips_bit_identically() {
        let record = fixture();
        let json = serde_json::to_string(&record).unwrap();
        let back: EvaluationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn reporter_with_fixed_stamp_is_deterministic() {
        let record = fixture();
        let reporter = JsonReporter::new().compact().timestamp(record.evaluated_at);

        let first = reporter.render(&record.sample, &record.result).unwrap();
        let second = reporter.render(&record.sample, &record.result).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains('\n'));
    }

    #[test]
    fn pretty_output_names_the_classification_fields() {
        let record = fixture();
        let json = JsonReporter::new()
            .timestamp(record.evaluated_at)
            .render(&record.sample, &record.result)
            .unwrap();

        assert!(json.contains("\"recommended_method\": \"Rmb\""));
        assert!(json.contains("\"status\": \"Oos\""));
        assert!(json.contains("\"diagnostic\": \"UvSilentImpurity\""));
    }
}
