//! @acp:module "Diagnosis Loader"
//! @acp:summary "Load and merge diagnosis content from built-in defaults, project file and CLI"
//! @acp:domain diagnosis
//! @acp:layer io

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::types::*;

/// CLI overrides for diagnosis configuration
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub twist_threshold: Option<f64>,
    pub expert_name: Option<String>,
    pub product: Option<String>,
    pub code_word: Option<String>,
}

/// Load diagnosis configuration with 3-layer merging:
/// 1. Built-in defaults (diagnosis.defaults.json)
/// 2. Project content file (JSON or YAML)
/// 3. CLI overrides
pub fn load_diagnosis_config(
    project_content: Option<&Path>,
    cli: &CliOverrides,
) -> Result<DiagnosisConfig> {
    let mut config = load_builtin_defaults()?;

    if let Some(path) = project_content {
        if !path.exists() {
            bail!("Content file {:?} not found", path);
        }
        let project = load_project_overrides(path)?;
        config = merge_configs(config, project);
        tracing::debug!("Merged content file {:?}", path);
    }

    Ok(apply_cli_overrides(config, cli))
}

/// Built-in zone table and copy
pub fn load_builtin_defaults() -> Result<DiagnosisConfig> {
    let json = include_str!("../../content/diagnosis.defaults.json");
    serde_json::from_str(json).context("Failed to parse built-in diagnosis.defaults.json")
}

/// Load a project content file; YAML when the extension says so
pub fn load_project_overrides(path: &Path) -> Result<DiagnosisOverrides> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read content file {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML content file {:?}", path))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse content file {:?}", path))
    }
}

/// Merge project overrides into base config (project wins field by field)
pub fn merge_configs(base: DiagnosisConfig, project: DiagnosisOverrides) -> DiagnosisConfig {
    let mut result = base;

    if let Some(threshold) = project.twist_threshold {
        result.twist_threshold = threshold;
    }
    if let Some(fallback) = project.fallback_complaint {
        result.fallback_complaint = fallback;
    }
    if let Some(ref vars) = project.default_vars {
        result.default_vars.apply(vars);
    }

    for (zone, override_) in project.zones {
        match result.zones.get_mut(&zone) {
            Some(existing) => apply_zone_override(existing, override_),
            None => match zone_from_override(override_) {
                Some(config) => {
                    result.zones.insert(zone, config);
                }
                None => {
                    tracing::warn!("Incomplete override for zone '{}' with no defaults", zone)
                }
            },
        }
    }

    for zone in project.disabled_series {
        if let Some(existing) = result.zones.get_mut(&zone) {
            existing.series = None;
        }
    }

    result
}

fn apply_zone_override(zone: &mut ZoneConfig, override_: ZoneOverride) {
    if let Some(max_score) = override_.max_score {
        zone.max_score = max_score;
    }
    if let Some(rank) = override_.priority_rank {
        zone.priority_rank = Some(rank);
    }
    if let Some(label) = override_.label {
        zone.label = label;
    }
    if let Some(complaint) = override_.complaint {
        zone.complaint = Some(complaint);
    }
    if let Some(series) = override_.series {
        zone.series = Some(series);
    }
}

fn zone_from_override(override_: ZoneOverride) -> Option<ZoneConfig> {
    Some(ZoneConfig {
        max_score: override_.max_score?,
        priority_rank: override_.priority_rank,
        label: override_.label?,
        complaint: override_.complaint,
        series: override_.series,
    })
}

/// Apply CLI overrides to config
fn apply_cli_overrides(mut config: DiagnosisConfig, cli: &CliOverrides) -> DiagnosisConfig {
    if let Some(threshold) = cli.twist_threshold {
        config.twist_threshold = threshold;
    }
    config.default_vars.apply(&TemplateVarsOverride {
        expert_name: cli.expert_name.clone(),
        product: cli.product.clone(),
        code_word: cli.code_word.clone(),
    });
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_builtin_defaults() {
        let config = load_builtin_defaults().expect("Failed to load defaults");
        assert_eq!(config.zones.len(), 5);
        assert_eq!(config.zones[&Zone::Sales].max_score, 3);
        assert!(Zone::ALL.iter().all(|z| config.zones[z].series.is_some()));
    }

    #[test]
    fn test_merge_overrides_fields() {
        let base = load_builtin_defaults().unwrap();
        let project = DiagnosisOverrides {
            twist_threshold: Some(0.25),
            zones: [(
                Zone::Traffic,
                ZoneOverride {
                    label: Some("Audience flow".to_string()),
                    ..Default::default()
                },
            )]
            .into_iter()
            .collect(),
            disabled_series: vec![Zone::System],
            ..Default::default()
        };

        let merged = merge_configs(base.clone(), project);
        assert_eq!(merged.twist_threshold, 0.25);
        assert_eq!(merged.zones[&Zone::Traffic].label, "Audience flow");
        assert_eq!(
            merged.zones[&Zone::Traffic].max_score,
            base.zones[&Zone::Traffic].max_score
        );
        assert!(merged.zones[&Zone::System].series.is_none());
    }

    #[test]
    fn test_project_vars_merge_field_by_field() {
        let base = load_builtin_defaults().unwrap();
        let project = DiagnosisOverrides {
            default_vars: Some(TemplateVarsOverride {
                product: Some("the Growth Sprint".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge_configs(base.clone(), project);
        assert_eq!(merged.default_vars.product, "the Growth Sprint");
        assert_eq!(merged.default_vars.expert_name, base.default_vars.expert_name);
        assert_eq!(merged.default_vars.code_word, base.default_vars.code_word);
    }

    #[test]
    fn test_cli_overrides_vars() {
        let config = load_builtin_defaults().unwrap();
        let cli = CliOverrides {
            expert_name: Some("Anna".to_string()),
            twist_threshold: Some(0.1),
            ..Default::default()
        };
        let result = apply_cli_overrides(config, &cli);
        assert_eq!(result.default_vars.expert_name, "Anna");
        assert_eq!(result.twist_threshold, 0.1);
    }

    #[test]
    fn test_load_yaml_project_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "twistThreshold: 0.5\nzones:\n  sales:\n    label: Selling").unwrap();

        let config =
            load_diagnosis_config(Some(file.path()), &CliOverrides::default()).unwrap();
        assert_eq!(config.twist_threshold, 0.5);
        assert_eq!(config.zones[&Zone::Sales].label, "Selling");
    }

    #[test]
    fn test_missing_project_file_is_error() {
        let err = load_diagnosis_config(
            Some(Path::new("/nonexistent/quiz-content.json")),
            &CliOverrides::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_no_project_file_uses_defaults() {
        let config = load_diagnosis_config(None, &CliOverrides::default()).unwrap();
        assert_eq!(config, load_builtin_defaults().unwrap());
    }
}
