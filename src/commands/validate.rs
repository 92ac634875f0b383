//! @acp:module "Validate Command"
//! @acp:summary "Check a content file against the zone table rules and the question bank"
//! @acp:domain cli
//! @acp:layer handler

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use crate::collector::reachable_scores;
use crate::config::Config;
use crate::diagnosis::tokens::unknown_tokens;
use crate::diagnosis::{load_diagnosis_config, CliOverrides, DiagnosisConfig, DiagnosisEngine, Zone};

/// Options for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Content file to validate; the configured one when unset
    pub file: Option<PathBuf>,
}

/// Token that the renderer will leave untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownToken {
    pub zone: Zone,
    /// `confirmation`, `twist` or `button:<id>`
    pub location: String,
    pub token: String,
}

/// Non-fatal findings for a content file that built successfully
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub source: Option<PathBuf>,
    pub missing_series: Vec<Zone>,
    pub unknown_tokens: Vec<UnknownToken>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing_series.is_empty() && self.unknown_tokens.is_empty()
    }
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, config: &Config) -> Result<()> {
    let source = options.file.or_else(|| config.content_path());
    let report = validate_content(source.as_deref())?;

    let name = report
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in content".to_string());

    for zone in &report.missing_series {
        println!(
            "{} Zone '{}' has no result copy; users will see a placeholder",
            style("⚠").yellow(),
            zone
        );
    }
    for unknown in &report.unknown_tokens {
        println!(
            "{} Unknown token {{{}}} in {} ({}) will be shown verbatim",
            style("⚠").yellow(),
            unknown.token,
            unknown.zone,
            unknown.location
        );
    }

    if report.is_clean() {
        println!("{} {} is valid", style("✓").green(), name);
    } else {
        println!("{} {} is usable, with warnings", style("✓").green(), name);
    }

    Ok(())
}

/// Build an engine from the content and collect warnings.
///
/// Structural problems (missing zones, bad ranks, a max score below what
/// the questions award) are returned as errors.
pub fn validate_content(source: Option<&Path>) -> Result<ValidationReport> {
    let config = load_diagnosis_config(source, &CliOverrides::default())?;
    let unknown = scan_tokens(&config);

    let engine = DiagnosisEngine::new(config).context("Invalid diagnosis configuration")?;
    engine
        .check_reachable(&reachable_scores())
        .context("Max scores do not match the question bank")?;

    Ok(ValidationReport {
        source: source.map(Path::to_path_buf),
        missing_series: engine.table().missing_series(),
        unknown_tokens: unknown,
    })
}

fn scan_tokens(config: &DiagnosisConfig) -> Vec<UnknownToken> {
    let mut found = Vec::new();
    for (zone, zone_config) in &config.zones {
        let Some(ref series) = zone_config.series else {
            continue;
        };

        let mut templates = vec![
            ("confirmation".to_string(), series.confirmation.as_str()),
            ("twist".to_string(), series.twist.as_str()),
        ];
        for button in &series.buttons {
            templates.push((format!("button:{}", button.id), button.text.as_str()));
        }

        for (location, template) in templates {
            for token in unknown_tokens(template) {
                found.push(UnknownToken {
                    zone: *zone,
                    location: location.clone(),
                    token,
                });
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_content_is_clean() {
        let report = validate_content(None).unwrap();
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_unknown_token_reported() {
        let file = yaml_file(
            r#"
zones:
  sales:
    series:
      confirmation: "Hi {NAME}, your thief is {BOTTLENECK}"
      twist: "{BOTTLENECK}"
      buttons:
        - id: promo
          text: "Use {PROMO}"
"#,
        );
        let report = validate_content(Some(file.path())).unwrap();
        let tokens: Vec<_> = report
            .unknown_tokens
            .iter()
            .map(|t| (t.location.as_str(), t.token.as_str()))
            .collect();
        assert_eq!(tokens, vec![("confirmation", "NAME"), ("button:promo", "PROMO")]);
    }

    #[test]
    fn test_disabled_series_is_warning() {
        let file = yaml_file("disabledSeries: [system]\n");
        let report = validate_content(Some(file.path())).unwrap();
        assert_eq!(report.missing_series, vec![Zone::System]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_low_max_score_is_error() {
        let file = yaml_file("zones:\n  sales:\n    maxScore: 1\n");
        assert!(validate_content(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = validate_content(Some(Path::new("/nonexistent/quiz-content.yaml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_duplicate_rank_is_error() {
        let file = yaml_file("zones:\n  system:\n    priorityRank: 1\n");
        assert!(validate_content(Some(file.path())).is_err());
    }
}
