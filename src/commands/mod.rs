//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod diagnose;
pub mod output;
pub mod play;
pub mod validate;
pub mod zones;

pub use diagnose::{execute_diagnose, generate_diagnosis, DiagnoseOptions, DiagnosisOutput};
pub use output::{print_rendered, print_scores, to_terminal};
pub use play::{execute_play, PlayOptions};
pub use validate::{execute_validate, validate_content, ValidateOptions, ValidationReport};
pub use zones::{execute_zones, ZonesOptions};

use anyhow::{Context, Result};

use crate::collector::reachable_scores;
use crate::config::Config;
use crate::diagnosis::{load_diagnosis_config, CliOverrides, DiagnosisEngine};
use crate::error::QuizError;

/// Load content (config layer, then CLI layer) and build a checked engine
pub fn build_engine(config: &Config, cli: &CliOverrides) -> Result<DiagnosisEngine> {
    let overrides = merge_overrides(config.overrides(), cli);
    let content = config.content_path();
    let diagnosis = load_diagnosis_config(content.as_deref(), &overrides)?;

    let engine = DiagnosisEngine::new(diagnosis).context("Invalid diagnosis configuration")?;
    engine
        .check_reachable(&reachable_scores())
        .context("Diagnosis configuration does not match the question bank")?;
    Ok(engine)
}

/// Whether an error chain bottoms out in broken diagnosis configuration
pub fn is_config_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<QuizError>()
            .is_some_and(QuizError::is_config_error)
    })
}

/// CLI values win over values from the config file
fn merge_overrides(base: CliOverrides, cli: &CliOverrides) -> CliOverrides {
    CliOverrides {
        twist_threshold: cli.twist_threshold.or(base.twist_threshold),
        expert_name: cli.expert_name.clone().or(base.expert_name),
        product: cli.product.clone().or(base.product),
        code_word: cli.code_word.clone().or(base.code_word),
    }
}
