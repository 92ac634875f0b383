//! @acp:module "Diagnose Command"
//! @acp:summary "Diagnose a finished answer state without running the quiz"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use super::build_engine;
use super::output::{print_rendered, print_scores};
use crate::config::Config;
use crate::diagnosis::{
    render_json, AnswersState, CliOverrides, DiagnosisEngine, DiagnosticResult, OutputFormat,
    RenderedResult, Zone,
};

/// Options for the diagnose command
#[derive(Debug, Clone, Default)]
pub struct DiagnoseOptions {
    /// JSON file holding a serialized answer state
    pub answers: Option<PathBuf>,
    /// Score assignments in `zone=points` form
    pub scores: Vec<String>,
    /// Explicit perceived zone
    pub perceived: Option<String>,
    /// Output format
    pub format: OutputFormat,
    /// Print the score breakdown
    pub explain: bool,
    /// Threshold and template var overrides
    pub overrides: CliOverrides,
}

/// Diagnosis plus its rendering
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisOutput {
    pub result: DiagnosticResult,
    pub message: RenderedResult,
}

/// Execute the diagnose command
pub fn execute_diagnose(options: DiagnoseOptions, config: &Config) -> Result<()> {
    let engine = build_engine(config, &options.overrides)?;
    let output = generate_diagnosis(&options, &engine)?;

    match options.format {
        OutputFormat::Json => println!("{}", render_json(&output.result, &output.message)?),
        OutputFormat::Text => {
            if options.explain {
                print_scores(&output.result, engine.table());
            }
            print_rendered(&output.message);
        }
    }

    Ok(())
}

/// Build the answer state from options and diagnose it
pub fn generate_diagnosis(
    options: &DiagnoseOptions,
    engine: &DiagnosisEngine,
) -> Result<DiagnosisOutput> {
    let mut state = match options.answers {
        Some(ref path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read answers from {:?}", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse answers from {:?}", path))?
        }
        None => AnswersState::new(),
    };

    for assignment in &options.scores {
        let (zone, points) = parse_score_arg(assignment)?;
        state.add_pain(zone, points);
    }

    if let Some(ref perceived) = options.perceived {
        state.perceived_zone = Some(perceived.parse()?);
    }

    let result = engine.compute_result(&state);
    let message = engine.render(&result, None);

    Ok(DiagnosisOutput { result, message })
}

/// Parse `zone=points`
pub fn parse_score_arg(arg: &str) -> Result<(Zone, u32)> {
    let (zone, points) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected zone=points, got '{}'", arg))?;
    let zone: Zone = zone.parse()?;
    let points: u32 = points
        .trim()
        .parse()
        .with_context(|| format!("Invalid points in '{}'", arg))?;
    Ok((zone, points))
}
