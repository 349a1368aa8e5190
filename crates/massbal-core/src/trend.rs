//! Trend-study types for multi-timepoint stability series.
//!
//! A trend study is an ordered list of timepoints, each carrying the full
//! analytical inputs measured on that day. Evaluation of the series lives in
//! the engine crate; this module only defines the shapes.

use serde::{Deserialize, Serialize};

use crate::{ComplianceStatus, SampleInput};

/// One timepoint in a stability trend study
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Days since study start
    pub day: u32,
    /// Analytical inputs measured at this timepoint
    pub sample: SampleInput,
}

/// A named series of timepoints, in study order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendStudy {
    /// Study label, e.g. "Accelerated 40C/75RH"
    pub name: String,
    /// Timepoints, earliest first
    #[serde(default)]
    pub points: Vec<TrendPoint>,
}

impl TrendStudy {
    /// Create an empty study with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Add a timepoint (builder pattern)
    pub fn point(mut self, day: u32, sample: SampleInput) -> Self {
        self.points.push(TrendPoint { day, sample });
        self
    }

    /// Number of timepoints in the study
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the study has no timepoints
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One evaluated row of the trend table.
///
/// Mirrors the tracking report's columns: the uncorrected, absolute and
/// corrected balances plus the acceptance status for each day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    /// Days since study start
    pub day: u32,
    /// Simple mass balance (%)
    pub smb: f64,
    /// Absolute mass balance (%)
    pub amb: f64,
    /// Corrected mass balance (%)
    pub lk_imb: f64,
    /// Acceptance classification for this timepoint
    pub status: ComplianceStatus,
}
