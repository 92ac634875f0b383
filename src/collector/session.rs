//! @acp:module "Quiz Session"
//! @acp:summary "Linear state machine that collects one answer per turn"
//! @acp:domain collector
//! @acp:layer logic

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::questions::*;
use crate::diagnosis::AnswersState;
use crate::error::{QuizError, Result};

const MIN_NAME_CHARS: usize = 2;
const MIN_NICHE_CHARS: usize = 3;

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Name,
    Niche,
    Profile(usize),
    Perceived,
    Diagnostic(usize),
    Done,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Name => write!(f, "name"),
            Step::Niche => write!(f, "niche"),
            Step::Profile(i) => write!(f, "{}", PROFILE_QUESTIONS[*i].id),
            Step::Perceived => write!(f, "{}", PERCEIVED_QUESTION.id),
            Step::Diagnostic(i) => write!(f, "{}", DIAGNOSTIC_QUESTIONS[*i].id),
            Step::Done => write!(f, "done"),
        }
    }
}

/// Profile fields captured alongside the scores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    /// Prepositional phrase, e.g. "in consulting"
    pub niche: String,
    /// Question id -> chosen answer label
    pub answers: BTreeMap<String, String>,
}

/// A choice offered to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    pub id: String,
    pub label: String,
}

/// What to show for the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub text: String,
    pub options: Vec<PromptOption>,
    /// Free text is accepted at this step
    pub accepts_text: bool,
}

/// One user's pass through the quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    step: Step,
    ask_perceived: bool,
    profile: Profile,
    answers: AnswersState,
}

impl QuizSession {
    /// Start a session; `ask_perceived = false` is the short variant
    pub fn new(ask_perceived: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: Step::Name,
            ask_perceived,
            profile: Profile::default(),
            answers: AnswersState::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn answers(&self) -> &AnswersState {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.step == Step::Done
    }

    /// Prompt for the current step, `None` once finished
    pub fn prompt(&self) -> Option<Prompt> {
        match self.step {
            Step::Name => Some(Prompt {
                title: "Introduce yourself".to_string(),
                text: "Before we start the investigation: what's your name?".to_string(),
                options: Vec::new(),
                accepts_text: true,
            }),
            Step::Niche => Some(Prompt {
                title: "Your field".to_string(),
                text: format!(
                    "Nice to meet you, {}! 👋\n\nWhat field do you work in?",
                    self.profile.name
                ),
                options: NICHE_OPTIONS
                    .iter()
                    .map(|(id, label, _)| PromptOption {
                        id: id.to_string(),
                        label: label.to_string(),
                    })
                    .chain(std::iter::once(PromptOption {
                        id: NICHE_CUSTOM.to_string(),
                        label: "✍️ Other (I'll type it)".to_string(),
                    }))
                    .collect(),
                accepts_text: true,
            }),
            Step::Profile(i) => Some(self.question_prompt(&PROFILE_QUESTIONS[i])),
            Step::Perceived => Some(self.question_prompt(&PERCEIVED_QUESTION)),
            Step::Diagnostic(i) => Some(self.question_prompt(&DIAGNOSTIC_QUESTIONS[i])),
            Step::Done => None,
        }
    }

    fn question_prompt(&self, question: &Question) -> Prompt {
        Prompt {
            title: question.title.to_string(),
            text: question
                .prompt
                .replace("{name}", &self.profile.name)
                .replace("{niche}", &self.profile.niche),
            options: question
                .options
                .iter()
                .map(|o| PromptOption {
                    id: o.id.to_string(),
                    label: o.label.to_string(),
                })
                .collect(),
            accepts_text: false,
        }
    }

    /// Submit free text (name, or a custom niche)
    pub fn submit_text(&mut self, text: &str) -> Result<Step> {
        match self.step {
            Step::Name => {
                let name = text.trim();
                if name.chars().count() < MIN_NAME_CHARS {
                    return Err(QuizError::InvalidInput(format!(
                        "name must be at least {} characters",
                        MIN_NAME_CHARS
                    )));
                }
                self.profile.name = name.to_string();
                Ok(self.advance())
            }
            Step::Niche => {
                self.profile.niche = normalize_niche(text)?;
                Ok(self.advance())
            }
            Step::Done => Err(QuizError::SessionFinished),
            step => Err(QuizError::UnexpectedInput(step.to_string())),
        }
    }

    /// Submit a button choice by option id
    pub fn submit_choice(&mut self, option_id: &str) -> Result<Step> {
        let question = match self.step {
            Step::Niche => {
                let (_, _, phrase) = NICHE_OPTIONS
                    .iter()
                    .find(|(id, _, _)| *id == option_id)
                    .ok_or_else(|| self.unknown_option(option_id))?;
                self.profile.niche = phrase.to_string();
                return Ok(self.advance());
            }
            Step::Profile(i) => &PROFILE_QUESTIONS[i],
            Step::Perceived => &PERCEIVED_QUESTION,
            Step::Diagnostic(i) => &DIAGNOSTIC_QUESTIONS[i],
            Step::Done => return Err(QuizError::SessionFinished),
            Step::Name => return Err(QuizError::UnexpectedInput(self.step.to_string())),
        };

        let option = question
            .option(option_id)
            .ok_or_else(|| self.unknown_option(option_id))?;

        match option.effect {
            Effect::Record => {}
            Effect::Perceived(zone) => self.answers.perceived_zone = Some(zone),
            Effect::Pain { zone, points } => self.answers.add_pain(zone, points),
        }
        if let Some((zone, level)) = option.complaint {
            self.answers.record_complaint(zone, level);
        }
        self.profile
            .answers
            .insert(question.id.to_string(), option.label.to_string());

        Ok(self.advance())
    }

    fn unknown_option(&self, option_id: &str) -> QuizError {
        QuizError::UnknownOption {
            step: self.step.to_string(),
            option: option_id.to_string(),
        }
    }

    fn advance(&mut self) -> Step {
        self.step = match self.step {
            Step::Name => Step::Niche,
            Step::Niche => Step::Profile(0),
            Step::Profile(i) if i + 1 < PROFILE_QUESTIONS.len() => Step::Profile(i + 1),
            Step::Profile(_) if self.ask_perceived => Step::Perceived,
            Step::Profile(_) | Step::Perceived => Step::Diagnostic(0),
            Step::Diagnostic(i) if i + 1 < DIAGNOSTIC_QUESTIONS.len() => Step::Diagnostic(i + 1),
            Step::Diagnostic(_) | Step::Done => Step::Done,
        };
        tracing::debug!(session = %self.id, step = %self.step, "Advanced quiz session");
        self.step
    }

    /// Hand over the collected state once every question is answered
    pub fn finish(self) -> Result<(Profile, AnswersState)> {
        if !self.is_finished() {
            return Err(QuizError::SessionIncomplete);
        }
        Ok((self.profile, self.answers))
    }
}

/// Normalize a free-text niche into a prompt phrase
pub fn normalize_niche(text: &str) -> Result<String> {
    let niche = text.trim().to_lowercase();
    if niche.chars().count() < MIN_NICHE_CHARS {
        return Err(QuizError::InvalidInput(format!(
            "field must be at least {} characters",
            MIN_NICHE_CHARS
        )));
    }
    if niche.starts_with("in ") {
        Ok(niche)
    } else {
        Ok(format!("in {}", niche))
    }
}
