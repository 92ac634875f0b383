//! @acp:module "Collector"
//! @acp:summary "Answer collector: fixed question bank and per-user session state machine"
//! @acp:domain collector
//! @acp:layer feature
//!
//! Walks one user through name, niche, profiling questions, an optional
//! self-diagnosis question and one diagnostic question per zone, producing
//! the [`AnswersState`](crate::diagnosis::AnswersState) the engine consumes.

pub mod questions;
pub mod session;

pub use questions::{reachable_scores, AnswerOption, Effect, Question};
pub use session::{normalize_niche, Profile, Prompt, PromptOption, QuizSession, Step};
