//! TOML input files for samples and trend studies.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use massbal_core::{SampleInput, TrendStudy};

/// Template written by `massbal init`: the worksheet's default test record.
pub const SAMPLE_TEMPLATE: &str = r#"# massbal sample input
# Assays are percent of label claim; degradants are total area percent.
# Default values provided for testing.

sample_id = "VAL-2026-001"
analyst = "A. Singla"
# One of: Acid, Base, Oxidative, Thermal, Photolytic
stress = "Base"

initial_api_assay = 98.00
stressed_api_assay = 82.50
initial_degradants = 0.50
stressed_degradants = 4.90

# Optional corrections; remove a line to default that factor to 1.0
parent_mw = 500.0
degradant_mw = 250.0
rrf = 0.80
"#;

/// Read a single sample from a TOML file
pub fn read_sample(path: &Path) -> Result<SampleInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read sample file {}", path.display()))?;
    let sample: SampleInput = toml::from_str(&text)
        .with_context(|| format!("invalid sample file {}", path.display()))?;
    Ok(sample)
}

/// Read a trend study from a TOML file
pub fn read_study(path: &Path) -> Result<TrendStudy> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read trend study {}", path.display()))?;
    let study: TrendStudy = toml::from_str(&text)
        .with_context(|| format!("invalid trend study {}", path.display()))?;
    if study.is_empty() {
        bail!("trend study {} has no timepoints", path.display());
    }
    Ok(study)
}

/// Write the sample template; refuses to clobber an existing file
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::write(path, SAMPLE_TEMPLATE)
        .with_context(|| format!("failed to write template {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use massbal_core::StressCondition;

    #[test]
    fn template_parses_to_the_builtin_defaults() {
        let sample: SampleInput = toml::from_str(SAMPLE_TEMPLATE).unwrap();
        assert_eq!(sample, SampleInput::template());
    }

    #[test]
    fn minimal_sample_fills_defaults() {
        let sample: SampleInput = toml::from_str(
            r#"
            sample_id = "S-1"
            initial_api_assay = 99.0
            stressed_api_assay = 95.0
            stressed_degradants = 3.5
            "#,
        )
        .unwrap();

        assert_eq!(sample.analyst, "");
        assert_eq!(sample.stress, StressCondition::Base);
        assert_eq!(sample.initial_degradants, 0.0);
        assert_eq!(sample.rrf, None);
    }

    #[test]
    fn study_toml_round_trip() {
        let toml_text = r#"
            name = "Accelerated 40C/75RH"

            [[points]]
            day = 0
            [points.sample]
            sample_id = "T0"
            initial_api_assay = 99.5
            stressed_api_assay = 99.5
            stressed_degradants = 0.3

            [[points]]
            day = 7
            [points.sample]
            sample_id = "T7"
            initial_api_assay = 99.5
            stressed_api_assay = 98.0
            stressed_degradants = 1.7
        "#;

        let study: TrendStudy = toml::from_str(toml_text).unwrap();
        assert_eq!(study.name, "Accelerated 40C/75RH");
        assert_eq!(study.len(), 2);
        assert_eq!(study.points[1].day, 7);
        assert_eq!(study.points[1].sample.sample_id, "T7");
    }
}
