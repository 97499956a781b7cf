use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};
use crate::services::grading::AnswerMatching;

#[derive(Clone, Debug)]
pub struct Config {
    pub question_bank_path: Option<PathBuf>,
    pub default_quiz_id: String,
    pub pass_threshold_percent: u32,
    pub low_time_warning_seconds: u32,
    pub tick_interval_ms: u64,
    pub fill_blank_matching: AnswerMatching,
    /// Variables that were set but could not be parsed.
    pub rejected_settings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let mut rejected = Vec::new();
        let pass_threshold_percent = parse_setting("PASS_THRESHOLD_PERCENT", 70, &mut rejected);
        let low_time_warning_seconds =
            parse_setting("LOW_TIME_WARNING_SECONDS", 300, &mut rejected);
        let tick_interval_ms = parse_setting("TICK_INTERVAL_MS", 1000, &mut rejected);
        let fill_blank_matching =
            parse_setting("FILL_BLANK_MATCHING", AnswerMatching::default(), &mut rejected);

        Self {
            question_bank_path: env::var("QUESTION_BANK_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_quiz_id: env::var("DEFAULT_QUIZ_ID")
                .unwrap_or_else(|_| "past-perfect-quiz".to_string()),
            pass_threshold_percent,
            low_time_warning_seconds,
            tick_interval_ms,
            fill_blank_matching,
            rejected_settings: rejected,
        }
    }

    /// Rejects settings the runner cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !self.rejected_settings.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Unparseable settings: {}",
                self.rejected_settings.join(", ")
            )));
        }

        if self.pass_threshold_percent > 100 {
            return Err(AppError::ValidationError(format!(
                "PASS_THRESHOLD_PERCENT must be between 0 and 100, got {}",
                self.pass_threshold_percent
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(AppError::ValidationError(
                "TICK_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        if self.default_quiz_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "DEFAULT_QUIZ_ID must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            question_bank_path: None,
            default_quiz_id: "past-perfect-quiz".to_string(),
            pass_threshold_percent: 70,
            low_time_warning_seconds: 300,
            tick_interval_ms: 1000,
            fill_blank_matching: AnswerMatching::Trimmed,
            rejected_settings: Vec::new(),
        }
    }
}

fn parse_setting<T: FromStr>(name: &str, default: T, rejected: &mut Vec<String>) -> T {
    parse_value(name, env::var(name).ok(), default, rejected)
}

/// Unset falls back to `default`; set but unparseable is recorded in `rejected`.
fn parse_value<T: FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
    rejected: &mut Vec<String>,
) -> T {
    let Some(raw) = raw else {
        return default;
    };

    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", name, raw);
            rejected.push(format!("{}={}", name, raw));
            default
        }
    }
}
