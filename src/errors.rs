use thiserror::Error;

use crate::models::domain::quiz_attempt::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid state: cannot {operation} while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    #[error("Index out of range: question {index} does not exist (quiz has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Degenerate quiz: {0}")]
    DegenerateQuiz(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidState { .. } => "INVALID_STATE",
            AppError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            AppError::DegenerateQuiz(_) => "DEGENERATE_QUIZ",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Caller contract violations; retrying the same call can never succeed.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidState { .. }
                | AppError::IndexOutOfRange { .. }
                | AppError::DegenerateQuiz(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ValidationError(format!("Malformed question bank JSON: {}", err))
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("I/O error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
