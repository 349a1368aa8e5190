//! Trend table renderer
//!
//! Fixed-width text table for stability series, one row per timepoint:
//!
//! ```text
//! Trend: Accelerated 40C/75RH
//! Day        SMB       AMB    LK-IMB   Status
//!   0      99.50    100.00    100.00   PASS
//!   7      95.00     96.20     98.50   PASS
//!  14      88.00     90.10     97.40   PASS
//!  30      82.00     85.50     96.20   PASS
//! ```

use massbal_core::{RenderError, TrendRow};

/// Fixed-width trend table renderer
#[derive(Clone, Debug)]
pub struct TrendTableRenderer {
    /// Decimal places for recovery figures
    pub decimals: usize,
    /// Whether to print the study name header line
    pub show_title: bool,
}

impl Default for TrendTableRenderer {
    fn default() -> Self {
        Self {
            decimals: 2,
            show_title: true,
        }
    }
}

impl TrendTableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of decimal places
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Omit the title line
    pub fn no_title(mut self) -> Self {
        self.show_title = false;
        self
    }

    /// Render a study's evaluated rows as a text table
    pub fn render(&self, study_name: &str, rows: &[TrendRow]) -> Result<String, RenderError> {
        if rows.is_empty() {
            return Err(RenderError::InvalidData(format!(
                "trend study '{study_name}' has no evaluated timepoints"
            )));
        }

        let prec = self.decimals;
        let mut out = String::new();

        if self.show_title {
            out.push_str(&format!("Trend: {study_name}\n"));
        }
        out.push_str(&format!(
            "{:>3} {:>9} {:>9} {:>9}   {}\n",
            "Day", "SMB", "AMB", "LK-IMB", "Status"
        ));
        for row in rows {
            out.push_str(&format!(
                "{:>3} {:>9.prec$} {:>9.prec$} {:>9.prec$}   {}\n",
                row.day, row.smb, row.amb, row.lk_imb, row.status,
            ));
        }

        Ok(out)
    }
}
