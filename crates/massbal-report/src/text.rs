//! Plain-text diagnostic report renderer
//!
//! Produces the diagnostic report as a fixed-width text block: sample
//! header, the four-method results table, the recommendation, and the
//! final status with its diagnostic line.
//!
//! ## Example Output
//!
//! ```text
//! MASS BALANCE DIAGNOSTIC REPORT
//! ==============================
//! Sample ID : VAL-2026-001
//! Analyst   : A. Singla
//! Stress    : Base
//!
//! Method               Result (%)  Correction
//! SMB (Uncorrected)         87.40  None
//! AMB (Absolute)            88.73  Purity Norm.
//! RMB (Relative)          * 28.39  None
//! LK-IMB (Corrected)        96.68  Stoich + RRF
//!
//! Recommended method : RMB
//! Recommended value  : 28.39 %
//! Degradation level  : 15.82 %
//! Confidence index   : 77.82
//!
//! FINAL STATUS: OOS
//! FAIL: UV-Silent Impurity. Rec: CAD Detection.
//! Rationale: Missing mass at the detection wavelength points to
//! chromophore loss in the degradation pathway.
//! ```

use chrono::NaiveDate;
use massbal_core::{DerivedResult, ReconciliationMethod, RenderError, ReportRenderer, SampleInput};

/// Plain-text diagnostic report renderer
#[derive(Clone, Debug)]
pub struct TextReporter {
    /// Decimal places for recovery figures
    pub decimals: usize,
    /// Whether to append the diagnostic rationale sentence
    pub show_rationale: bool,
    /// Optional report date; omitted by default to keep output deterministic
    pub report_date: Option<NaiveDate>,
}

impl Default for TextReporter {
    fn default() -> Self {
        Self {
            decimals: 2,
            show_rationale: true,
            report_date: None,
        }
    }
}

impl TextReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of decimal places
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Omit the rationale line
    pub fn no_rationale(mut self) -> Self {
        self.show_rationale = false;
        self
    }

    /// Stamp the report with a date line
    pub fn report_date(mut self, date: NaiveDate) -> Self {
        self.report_date = Some(date);
        self
    }

    fn method_rows(result: &DerivedResult) -> [(ReconciliationMethod, &'static str, f64); 4] {
        [
            (ReconciliationMethod::Smb, "None", result.smb),
            (ReconciliationMethod::Amb, "Purity Norm.", result.amb),
            (ReconciliationMethod::Rmb, "None", result.rmb),
            (ReconciliationMethod::LkImb, "Stoich + RRF", result.lk_imb),
        ]
    }

    fn method_label(method: ReconciliationMethod) -> &'static str {
        match method {
            ReconciliationMethod::Smb => "SMB (Uncorrected)",
            ReconciliationMethod::Amb => "AMB (Absolute)",
            ReconciliationMethod::Rmb => "RMB (Relative)",
            ReconciliationMethod::LkImb => "LK-IMB (Corrected)",
        }
    }
}

impl ReportRenderer for TextReporter {
    type Output = String;

    fn render(
        &self,
        sample: &SampleInput,
        result: &DerivedResult,
    ) -> Result<Self::Output, RenderError> {
        let prec = self.decimals;
        let mut out = String::new();

        out.push_str("MASS BALANCE DIAGNOSTIC REPORT\n");
        out.push_str("==============================\n");
        if let Some(date) = self.report_date {
            out.push_str(&format!("Date      : {}\n", date.format("%Y-%m-%d")));
        }
        out.push_str(&format!("Sample ID : {}\n", sample.sample_id));
        if !sample.analyst.is_empty() {
            out.push_str(&format!("Analyst   : {}\n", sample.analyst));
        }
        out.push_str(&format!("Stress    : {}\n", sample.stress));
        out.push('\n');

        out.push_str(&format!(
            "{:<20} {:>11}  {}\n",
            "Method", "Result (%)", "Correction"
        ));
        for (method, correction, value) in Self::method_rows(result) {
            let marker = if method == result.recommended_method {
                "*"
            } else {
                " "
            };
            out.push_str(&format!(
                "{:<20} {}{:>10.prec$}  {}\n",
                Self::method_label(method),
                marker,
                value,
                correction,
            ));
        }
        out.push('\n');

        out.push_str(&format!(
            "Recommended method : {}\n",
            result.recommended_method
        ));
        out.push_str(&format!(
            "Recommended value  : {:.prec$} %\n",
            result.recommended_value
        ));
        out.push_str(&format!(
            "Degradation level  : {:.prec$} %\n",
            result.degradation_level
        ));
        out.push_str(&format!(
            "Confidence index   : {:.prec$}\n",
            result.confidence_index
        ));
        out.push('\n');

        out.push_str(&format!("FINAL STATUS: {}\n", result.status));
        out.push_str(result.diagnostic.message());
        out.push('\n');
        if self.show_rationale {
            out.push_str(&format!("Rationale: {}\n", result.diagnostic.rationale()));
        }

        Ok(out)
    }
}
