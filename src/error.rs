//! @acp:module "Errors"
//! @acp:summary "Library error type and result alias"
//! @acp:domain diagnosis
//! @acp:layer types

use thiserror::Error;

use crate::diagnosis::Zone;

/// Errors raised by the quiz library.
///
/// Configuration variants are startup-time failures: they surface when the
/// engine is built, never while a session is being diagnosed.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("zone '{0}' has no configuration entry")]
    MissingZone(Zone),

    #[error("zone '{0}' has a max score of zero")]
    ZeroMaxScore(Zone),

    #[error("zone '{0}' is missing from the priority order")]
    MissingPriority(Zone),

    #[error("priority rank {rank} is shared by '{first}' and '{second}'")]
    DuplicatePriority { rank: u32, first: Zone, second: Zone },

    #[error("zone '{0}' has an empty label")]
    EmptyLabel(Zone),

    #[error("twist threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("zone '{zone}' max score {max} is below the reachable score {reachable}")]
    UnreachableMaxScore { zone: Zone, max: u32, reachable: u32 },

    #[error("unknown zone: {0}")]
    UnknownZone(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown option '{option}' for step {step}")]
    UnknownOption { step: String, option: String },

    #[error("step {0} expects a different kind of answer")]
    UnexpectedInput(String),

    #[error("the quiz session is already finished")]
    SessionFinished,

    #[error("the quiz session is not finished yet")]
    SessionIncomplete,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl QuizError {
    /// True for errors that indicate broken configuration rather than bad input
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QuizError::MissingZone(_)
                | QuizError::ZeroMaxScore(_)
                | QuizError::MissingPriority(_)
                | QuizError::DuplicatePriority { .. }
                | QuizError::EmptyLabel(_)
                | QuizError::ThresholdOutOfRange(_)
                | QuizError::UnreachableMaxScore { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_classification() {
        assert!(QuizError::ZeroMaxScore(Zone::Sales).is_config_error());
        assert!(QuizError::ThresholdOutOfRange(1.5).is_config_error());
        assert!(!QuizError::SessionFinished.is_config_error());
        assert!(!QuizError::InvalidInput("x".into()).is_config_error());
    }

    #[test]
    fn test_error_messages_name_the_zone() {
        let err = QuizError::MissingPriority(Zone::Content);
        assert_eq!(err.to_string(), "zone 'content' is missing from the priority order");
    }
}
