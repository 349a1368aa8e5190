//! # massbal-core
//!
//! Core domain model and traits for the massbal mass-balance engine.
//!
//! This crate provides:
//! - Domain types: `SampleInput`, `DerivedResult`, `StressCondition`
//! - Classification types: `ReconciliationMethod`, `ComplianceStatus`, `DiagnosticKind`
//! - Core traits: `Evaluator`, `ReportRenderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use massbal_core::{SampleInput, StressCondition};
//!
//! let sample = SampleInput::new("VAL-2026-014")
//!     .analyst("J. Okafor")
//!     .stress(StressCondition::Oxidative)
//!     .initial_api_assay(99.1)
//!     .stressed_api_assay(93.4)
//!     .initial_degradants(0.2)
//!     .stressed_degradants(5.1)
//!     .rrf(0.92);
//!
//! assert_eq!(sample.stress.as_str(), "Oxidative");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod trend;

pub use trend::{TrendPoint, TrendRow, TrendStudy};

// ============================================================================
// Stress Condition
// ============================================================================

/// Forced-degradation stress condition applied to the sample.
///
/// Purely descriptive: the condition is carried through to reports and
/// history filters but plays no part in the calculation itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressCondition {
    Acid,
    #[default]
    Base,
    Oxidative,
    Thermal,
    Photolytic,
}

impl StressCondition {
    /// All conditions, in the order the data-entry form lists them
    pub const ALL: [StressCondition; 5] = [
        StressCondition::Acid,
        StressCondition::Base,
        StressCondition::Oxidative,
        StressCondition::Thermal,
        StressCondition::Photolytic,
    ];

    /// Get the display string for this condition
    pub fn as_str(&self) -> &'static str {
        match self {
            StressCondition::Acid => "Acid",
            StressCondition::Base => "Base",
            StressCondition::Oxidative => "Oxidative",
            StressCondition::Thermal => "Thermal",
            StressCondition::Photolytic => "Photolytic",
        }
    }
}

impl std::fmt::Display for StressCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for parsing a stress condition from text
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stress condition: {0}")]
pub struct UnknownStressCondition(pub String);

impl std::str::FromStr for StressCondition {
    type Err = UnknownStressCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StressCondition::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| UnknownStressCondition(s.to_string()))
    }
}

// ============================================================================
// Sample Input
// ============================================================================

/// Analytical inputs for one mass-balance evaluation.
///
/// Assays are percent of label claim; degradants are total area percent.
/// Molecular weights and the relative response factor are optional; when
/// absent the corresponding correction factor defaults to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleInput {
    /// Sample identifier (free text, not used in calculation)
    pub sample_id: String,
    /// Analyst name (free text, not used in calculation)
    #[serde(default)]
    pub analyst: String,
    /// Stress condition applied
    #[serde(default)]
    pub stress: StressCondition,
    /// API assay at T0 (%)
    pub initial_api_assay: f64,
    /// API assay after stress (%)
    pub stressed_api_assay: f64,
    /// Total degradants at T0 (%)
    #[serde(default)]
    pub initial_degradants: f64,
    /// Total degradants after stress (%)
    pub stressed_degradants: f64,
    /// Parent molecular weight (g/mol)
    #[serde(default)]
    pub parent_mw: Option<f64>,
    /// Principal degradant molecular weight (g/mol)
    #[serde(default)]
    pub degradant_mw: Option<f64>,
    /// Relative response factor of the degradant versus the parent
    #[serde(default)]
    pub rrf: Option<f64>,
}

impl SampleInput {
    /// Create a new sample with the given identifier
    pub fn new(sample_id: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            analyst: String::new(),
            stress: StressCondition::default(),
            initial_api_assay: 0.0,
            stressed_api_assay: 0.0,
            initial_degradants: 0.0,
            stressed_degradants: 0.0,
            parent_mw: None,
            degradant_mw: None,
            rrf: None,
        }
    }

    /// The worksheet's default test record, used by `massbal init` and tests
    pub fn template() -> Self {
        SampleInput::new("VAL-2026-001")
            .analyst("A. Singla")
            .stress(StressCondition::Base)
            .initial_api_assay(98.00)
            .stressed_api_assay(82.50)
            .initial_degradants(0.50)
            .stressed_degradants(4.90)
            .parent_mw(500.0)
            .degradant_mw(250.0)
            .rrf(0.80)
    }

    /// Set the analyst name
    pub fn analyst(mut self, analyst: impl Into<String>) -> Self {
        self.analyst = analyst.into();
        self
    }

    /// Set the stress condition
    pub fn stress(mut self, stress: StressCondition) -> Self {
        self.stress = stress;
        self
    }

    /// Set the initial API assay (%)
    pub fn initial_api_assay(mut self, pct: f64) -> Self {
        self.initial_api_assay = pct;
        self
    }

    /// Set the stressed API assay (%)
    pub fn stressed_api_assay(mut self, pct: f64) -> Self {
        self.stressed_api_assay = pct;
        self
    }

    /// Set the initial total degradants (%)
    pub fn initial_degradants(mut self, pct: f64) -> Self {
        self.initial_degradants = pct;
        self
    }

    /// Set the stressed total degradants (%)
    pub fn stressed_degradants(mut self, pct: f64) -> Self {
        self.stressed_degradants = pct;
        self
    }

    /// Set the parent molecular weight (g/mol)
    pub fn parent_mw(mut self, mw: f64) -> Self {
        self.parent_mw = Some(mw);
        self
    }

    /// Set the degradant molecular weight (g/mol)
    pub fn degradant_mw(mut self, mw: f64) -> Self {
        self.degradant_mw = Some(mw);
        self
    }

    /// Set the relative response factor
    pub fn rrf(mut self, rrf: f64) -> Self {
        self.rrf = Some(rrf);
        self
    }
}

// ============================================================================
// Classification Types
// ============================================================================

/// The four mass-balance reconciliation methods.
///
/// Each method suits a different magnitude of assay loss; the engine
/// recommends one per evaluation based on the assay delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationMethod {
    /// Simple mass balance: stressed assay + stressed degradants, uncorrected
    Smb,
    /// Absolute mass balance, normalized against the initial purity
    Amb,
    /// Relative mass balance: degradant growth over assay loss
    Rmb,
    /// Corrected mass balance with RRF and stoichiometric adjustments
    LkImb,
}

impl ReconciliationMethod {
    /// Get the display string for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationMethod::Smb => "SMB",
            ReconciliationMethod::Amb => "AMB",
            ReconciliationMethod::Rmb => "RMB",
            ReconciliationMethod::LkImb => "LK-IMB",
        }
    }
}

impl std::fmt::Display for ReconciliationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Acceptance classification of the recommended recovery value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// Recovery within acceptance limits
    Pass,
    /// Recovery below acceptance but above the action limit
    Alert,
    /// Out of specification
    Oos,
}

impl ComplianceStatus {
    /// Get the display string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "PASS",
            ComplianceStatus::Alert => "ALERT",
            ComplianceStatus::Oos => "OOS",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule-based diagnostic attached to every evaluation.
///
/// The variants carry fixed report text; the selection rules live in the
/// engine crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// OOS with an assay delta characteristic of volatile loss
    VolatileLoss,
    /// OOS with substantial assay loss unaccounted for at the detector
    UvSilentImpurity,
    /// Recovery within acceptance limits
    Compliant,
    /// Anything between the clear-cut outcomes
    Borderline,
}

impl DiagnosticKind {
    /// The report message for this diagnostic
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::VolatileLoss => "FAIL: Suspected Volatile Loss. Rec: Headspace GC.",
            DiagnosticKind::UvSilentImpurity => "FAIL: UV-Silent Impurity. Rec: CAD Detection.",
            DiagnosticKind::Compliant => "Mass Balance Compliant per ICH Q1A.",
            DiagnosticKind::Borderline => "Investigate: Borderline Result.",
        }
    }

    /// One-sentence rationale shown beside the message in reports
    pub fn rationale(&self) -> &'static str {
        match self {
            DiagnosticKind::VolatileLoss => {
                "Low recovery with no matching degradant growth suggests volatile degradation products."
            }
            DiagnosticKind::UvSilentImpurity => {
                "Missing mass at the detection wavelength points to chromophore loss in the degradation pathway."
            }
            DiagnosticKind::Compliant => "Results within acceptance limits. No anomalies detected.",
            DiagnosticKind::Borderline => {
                "Recovery sits between acceptance bands. Repeat the assay before batch disposition."
            }
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

// ============================================================================
// Derived Result
// ============================================================================

/// Everything the engine derives from one `SampleInput`.
///
/// A pure, total function of the input (modulo the guarded error cases):
/// never mutated after creation, safe to cache and compare.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedResult {
    /// Assay loss in percentage points (initial - stressed)
    pub delta_api: f64,
    /// Degradant growth in percentage points (stressed - initial)
    pub delta_deg: f64,
    /// Percent of the initial assay lost to stress
    pub degradation_level: f64,
    /// Detector response correction, 1/RRF (1.0 when RRF absent)
    pub lambda_correction: f64,
    /// Stoichiometric correction, parent MW / degradant MW (1.0 unless both present)
    pub omega_correction: f64,
    /// Stressed degradants after lambda and omega corrections
    pub corrected_deg: f64,
    /// Simple mass balance (%)
    pub smb: f64,
    /// Absolute mass balance (%)
    pub amb: f64,
    /// Relative mass balance (%); 0 when the assay delta is zero
    pub rmb: f64,
    /// Corrected mass balance (%)
    pub lk_imb: f64,
    /// Confidence in the absolute figure given analytical uncertainty
    pub confidence_index: f64,
    /// Method recommended for this magnitude of assay loss
    pub recommended_method: ReconciliationMethod,
    /// Recovery value from the recommended method (%)
    pub recommended_value: f64,
    /// Acceptance classification of the recommended value
    pub status: ComplianceStatus,
    /// Rule-based diagnostic
    pub diagnostic: DiagnosticKind,
}

impl DerivedResult {
    /// Look up the recovery value computed by a particular method
    pub fn value_for(&self, method: ReconciliationMethod) -> f64 {
        match method {
            ReconciliationMethod::Smb => self.smb,
            ReconciliationMethod::Amb => self.amb,
            ReconciliationMethod::Rmb => self.rmb,
            ReconciliationMethod::LkImb => self.lk_imb,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Core evaluation abstraction
pub trait Evaluator: Send + Sync {
    /// Derive all mass-balance quantities for one sample
    fn evaluate(&self, sample: &SampleInput) -> Result<DerivedResult, EvaluateError>;
}

/// Output rendering
pub trait ReportRenderer {
    type Output;

    /// Render one evaluation to the output format
    fn render(
        &self,
        sample: &SampleInput,
        result: &DerivedResult,
    ) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Evaluation error.
///
/// Raised once, at the input boundary; the derivation itself cannot fail.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvaluateError {
    #[error("invalid input: {field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("invalid input: {field} must be {requirement} (got {value})")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },

    #[error("degenerate baseline: initial API assay is zero, recovery cannot be normalized")]
    ZeroBaseline,

    #[error("relative response factor must be positive (got {0})")]
    NonPositiveRrf(f64),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
