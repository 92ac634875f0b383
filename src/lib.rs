#![forbid(unsafe_code)]

//! @acp:module "Quiz Library"
//! @acp:summary "Bottleneck quiz: answer collection, scoring and result templating"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # Bottleneck Quiz
//!
//! A short quiz funnel that finds which of five business zones (product,
//! traffic, content, sales, system) is holding a user back, and whether
//! that differs from what the user believes.
//!
//! ## Features
//!
//! - **Normalized scoring**: raw pain points divided by each zone's max
//! - **Deterministic ties**: a fixed priority order breaks equal scores
//! - **Twist detection**: flags a gap between real and perceived bottleneck
//! - **Token templates**: `{EXPERT}`, `{BOTTLENECK}` and friends, unknown
//!   tokens left as written
//! - **Layered content**: built-in copy, project file, CLI flags
//!
//! ## Example
//!
//! ```rust,no_run
//! use quiz::{AnswersState, DiagnosisEngine, Zone};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = DiagnosisEngine::builtin()?;
//!
//!     let mut answers = AnswersState::new();
//!     answers.add_pain(Zone::Traffic, 2);
//!     answers.perceived_zone = Some(Zone::Product);
//!
//!     let result = engine.compute_result(&answers);
//!     let message = engine.render(&result, None);
//!     println!("{}", message.text);
//!
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod commands;
pub mod config;
pub mod diagnosis;
pub mod error;

// Re-exports
pub use collector::{Profile, QuizSession, Step};
pub use config::Config;
pub use diagnosis::{
    AnswersState, DiagnosisConfig, DiagnosisEngine, DiagnosticResult, RenderedButton,
    RenderedResult, TemplateVars, Zone, ZoneTable,
};
pub use error::{QuizError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
