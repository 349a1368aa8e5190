//! # massbal-report
//!
//! Report renderers for massbal evaluations.
//!
//! This crate provides:
//! - Plain-text diagnostic reports
//! - JSON evaluation records (round-trip safe)
//! - Fixed-width trend tables for stability series
//!
//! ## Example
//!
//! ```rust,ignore
//! use massbal_core::{Evaluator, ReportRenderer, SampleInput};
//! use massbal_engine::MassBalanceEvaluator;
//! use massbal_report::TextReporter;
//!
//! let sample = SampleInput::template();
//! let result = MassBalanceEvaluator::new().evaluate(&sample)?;
//!
//! let report = TextReporter::new().render(&sample, &result)?;
//! println!("{report}");
//! ```

pub mod json;
pub mod text;
pub mod trend;

pub use json::{EvaluationRecord, JsonReporter};
pub use text::TextReporter;
pub use trend::TrendTableRenderer;
