//! # massbal-engine
//!
//! Mass-balance evaluation for ICH Q1A(R2)-style forced-degradation studies.
//!
//! This crate provides:
//! - The four reconciliation methods (SMB, AMB, RMB, LK-IMB)
//! - Method recommendation by assay-loss magnitude
//! - PASS/ALERT/OOS classification of the recommended recovery
//! - The rule-based diagnostic with its priority order
//! - Batch evaluation of trend studies
//!
//! ## Example
//!
//! ```rust
//! use massbal_core::{Evaluator, ReconciliationMethod, SampleInput};
//! use massbal_engine::MassBalanceEvaluator;
//!
//! let evaluator = MassBalanceEvaluator::new();
//! let result = evaluator.evaluate(&SampleInput::template()).unwrap();
//!
//! assert_eq!(result.recommended_method, ReconciliationMethod::Rmb);
//! ```

use massbal_core::{
    ComplianceStatus, DerivedResult, DiagnosticKind, EvaluateError, Evaluator,
    ReconciliationMethod, SampleInput,
};

pub mod trend;

// ============================================================================
// Thresholds
// ============================================================================

/// Below this assay delta (percentage points) the absolute method applies
pub const AMB_DELTA_CEILING: f64 = 2.0;

/// Above this assay delta the corrected LK-IMB method applies
pub const RMB_DELTA_CEILING: f64 = 20.0;

/// Recovery at or above this is PASS
pub const PASS_THRESHOLD: f64 = 95.0;

/// Recovery at or above this (but below `PASS_THRESHOLD`) is ALERT
pub const ALERT_THRESHOLD: f64 = 90.0;

/// OOS assay deltas above this point to a UV-silent impurity
pub const UV_SILENT_DELTA_FLOOR: f64 = 1.2;

/// Assay delta characteristic of volatile loss (percentage points)
pub const VOLATILE_LOSS_DELTA: f64 = 1.0;

/// Default half-width of the volatile-loss band around `VOLATILE_LOSS_DELTA`
pub const DEFAULT_VOLATILE_DELTA_TOLERANCE: f64 = 1e-6;

/// Analytical uncertainty (%) feeding the confidence index
pub const ANALYTICAL_UNCERTAINTY: f64 = 2.5;

/// Confidence reported when the absolute balance shows no drift at all
const FULL_RECOVERY_CONFIDENCE: f64 = 95.0;

// ============================================================================
// Evaluator
// ============================================================================

/// The mass-balance engine.
///
/// Stateless and side-effect free: the same input always yields the same
/// `DerivedResult`, so one evaluator can serve concurrent callers.
#[derive(Clone, Debug)]
pub struct MassBalanceEvaluator {
    /// Half-width of the assay-delta band classified as volatile loss.
    ///
    /// The legacy worksheet matched `delta == 1` with exact floating
    /// equality; the band makes that rule robust against representation
    /// noise without widening its meaning.
    pub volatile_delta_tolerance: f64,
}

impl MassBalanceEvaluator {
    pub fn new() -> Self {
        Self {
            volatile_delta_tolerance: DEFAULT_VOLATILE_DELTA_TOLERANCE,
        }
    }

    /// Set the volatile-loss band half-width
    pub fn volatile_delta_tolerance(mut self, tolerance: f64) -> Self {
        self.volatile_delta_tolerance = tolerance;
        self
    }
}

impl Default for MassBalanceEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for MassBalanceEvaluator {
    fn evaluate(&self, sample: &SampleInput) -> Result<DerivedResult, EvaluateError> {
        validate(sample)?;
        self.derive(sample)
    }
}

impl MassBalanceEvaluator {
    fn derive(&self, sample: &SampleInput) -> Result<DerivedResult, EvaluateError> {
        // Both AMB (initial assay + initial degradants) and LK-IMB (initial
        // assay alone) normalize against the T0 state; with degradants
        // validated non-negative, a zero initial assay is the only way either
        // denominator degenerates.
        if sample.initial_api_assay == 0.0 {
            return Err(EvaluateError::ZeroBaseline);
        }

        let delta_api = sample.initial_api_assay - sample.stressed_api_assay;
        let delta_deg = sample.stressed_degradants - sample.initial_degradants;
        let degradation_level = delta_api / sample.initial_api_assay * 100.0;

        let lambda_correction = sample.rrf.map_or(1.0, |rrf| 1.0 / rrf);
        let omega_correction = match (sample.parent_mw, sample.degradant_mw) {
            (Some(parent), Some(degradant)) => parent / degradant,
            _ => 1.0,
        };
        let corrected_deg = sample.stressed_degradants * lambda_correction * omega_correction;

        let baseline = sample.initial_api_assay + sample.initial_degradants;
        let smb = sample.stressed_api_assay + sample.stressed_degradants;
        let amb = smb / baseline * 100.0;
        let rmb = if delta_api == 0.0 {
            0.0
        } else {
            delta_deg / delta_api * 100.0
        };
        let lk_imb = (sample.stressed_api_assay + corrected_deg) / sample.initial_api_assay * 100.0;

        let drift = (100.0 - amb).abs();
        let confidence_index = if drift > 0.0 {
            100.0 * (1.0 - ANALYTICAL_UNCERTAINTY / drift)
        } else {
            FULL_RECOVERY_CONFIDENCE
        };

        let recommended_method = recommend_method(delta_api);
        let recommended_value = match recommended_method {
            ReconciliationMethod::Smb => smb,
            ReconciliationMethod::Amb => amb,
            ReconciliationMethod::Rmb => rmb,
            ReconciliationMethod::LkImb => lk_imb,
        };
        let status = classify(recommended_value);
        let diagnostic = self.diagnose(status, delta_api);

        Ok(DerivedResult {
            delta_api,
            delta_deg,
            degradation_level,
            lambda_correction,
            omega_correction,
            corrected_deg,
            smb,
            amb,
            rmb,
            lk_imb,
            confidence_index,
            recommended_method,
            recommended_value,
            status,
            diagnostic,
        })
    }

    /// Diagnostic rules, first match wins
    fn diagnose(&self, status: ComplianceStatus, delta_api: f64) -> DiagnosticKind {
        let volatile_band =
            (delta_api - VOLATILE_LOSS_DELTA).abs() <= self.volatile_delta_tolerance;

        if status == ComplianceStatus::Oos && volatile_band {
            DiagnosticKind::VolatileLoss
        } else if status == ComplianceStatus::Oos && delta_api > UV_SILENT_DELTA_FLOOR {
            DiagnosticKind::UvSilentImpurity
        } else if status == ComplianceStatus::Pass {
            DiagnosticKind::Compliant
        } else {
            DiagnosticKind::Borderline
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Pick the reconciliation method for a given assay delta
pub fn recommend_method(delta_api: f64) -> ReconciliationMethod {
    if delta_api < AMB_DELTA_CEILING {
        ReconciliationMethod::Amb
    } else if delta_api > RMB_DELTA_CEILING {
        ReconciliationMethod::LkImb
    } else {
        ReconciliationMethod::Rmb
    }
}

/// Classify a recovery value against the acceptance bands
pub fn classify(recovery: f64) -> ComplianceStatus {
    if recovery >= PASS_THRESHOLD {
        ComplianceStatus::Pass
    } else if recovery >= ALERT_THRESHOLD {
        ComplianceStatus::Alert
    } else {
        ComplianceStatus::Oos
    }
}

/// Reject non-finite or out-of-range inputs before any arithmetic runs
fn validate(sample: &SampleInput) -> Result<(), EvaluateError> {
    let percentages = [
        ("initial_api_assay", sample.initial_api_assay),
        ("stressed_api_assay", sample.stressed_api_assay),
        ("initial_degradants", sample.initial_degradants),
        ("stressed_degradants", sample.stressed_degradants),
    ];
    for (field, value) in percentages {
        if !value.is_finite() {
            return Err(EvaluateError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(EvaluateError::OutOfRange {
                field,
                requirement: "non-negative",
                value,
            });
        }
    }

    let weights = [
        ("parent_mw", sample.parent_mw),
        ("degradant_mw", sample.degradant_mw),
    ];
    for (field, value) in weights {
        if let Some(mw) = value {
            if !mw.is_finite() {
                return Err(EvaluateError::NonFinite { field });
            }
            if mw <= 0.0 {
                return Err(EvaluateError::OutOfRange {
                    field,
                    requirement: "positive",
                    value: mw,
                });
            }
        }
    }

    if let Some(rrf) = sample.rrf {
        if !rrf.is_finite() {
            return Err(EvaluateError::NonFinite { field: "rrf" });
        }
        if rrf <= 0.0 {
            return Err(EvaluateError::NonPositiveRrf(rrf));
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
