//! @acp:module "Diagnosis Engine"
//! @acp:summary "Validated, immutable entry point: compute a result and render it"
//! @acp:domain diagnosis
//! @acp:layer api

use super::loader::load_builtin_defaults;
use super::renderer::render_result;
use super::scoring;
use super::table::ZoneTable;
use super::types::*;
use crate::error::{QuizError, Result};

/// Scoring and templating engine.
///
/// Built once at startup; all configuration errors surface from [`new`].
/// After that, [`compute_result`] and [`render`] are pure functions of
/// their arguments.
///
/// [`new`]: DiagnosisEngine::new
/// [`compute_result`]: DiagnosisEngine::compute_result
/// [`render`]: DiagnosisEngine::render
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    table: ZoneTable,
    twist_threshold: f64,
    fallback_complaint: String,
    default_vars: TemplateVars,
}

impl DiagnosisEngine {
    /// Validate configuration and build the engine
    pub fn new(config: DiagnosisConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.twist_threshold) {
            return Err(QuizError::ThresholdOutOfRange(config.twist_threshold));
        }
        let table = ZoneTable::from_config(&config)?;

        Ok(Self {
            table,
            twist_threshold: config.twist_threshold,
            fallback_complaint: config.fallback_complaint,
            default_vars: config.default_vars,
        })
    }

    /// Engine over the built-in content only
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self::new(load_builtin_defaults()?)?)
    }

    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    pub fn twist_threshold(&self) -> f64 {
        self.twist_threshold
    }

    pub fn default_vars(&self) -> &TemplateVars {
        &self.default_vars
    }

    /// Fail if configured max scores cannot hold what the questions award
    pub fn check_reachable(&self, reachable: &ZoneScores) -> Result<()> {
        self.table.check_reachable(reachable)
    }

    pub fn compute_result(&self, state: &AnswersState) -> DiagnosticResult {
        scoring::compute_result(state, &self.table, self.twist_threshold)
    }

    /// Render a result; `None` uses the configured default vars
    pub fn render(&self, result: &DiagnosticResult, vars: Option<&TemplateVars>) -> RenderedResult {
        render_result(
            result,
            &self.table,
            &self.fallback_complaint,
            vars.unwrap_or(&self.default_vars),
        )
    }
}
