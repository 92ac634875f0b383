//! @acp:module "Diagnosis"
//! @acp:summary "Scoring and templating engine: bottleneck zone, twist decision, result copy"
//! @acp:domain diagnosis
//! @acp:layer feature

pub mod engine;
pub mod loader;
pub mod renderer;
pub mod scoring;
pub mod selector;
pub mod table;
pub mod tokens;
pub mod types;

pub use engine::DiagnosisEngine;
pub use loader::{load_diagnosis_config, CliOverrides};
pub use renderer::{placeholder_text, render_json, OutputFormat};
pub use scoring::{compute_result, decide_twist, normalize_scores, resolve_perceived};
pub use selector::pick_max_zone;
pub use table::ZoneTable;
pub use types::*;
