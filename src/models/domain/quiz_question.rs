use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct QuizQuestion {
    pub id: String,
    pub question_type: QuizQuestionType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>, // multiple choice only, identity by index
    pub correct_answer: Answer,
    pub explanation: String, // shown in review whether or not the answer was right
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuizQuestionType {
    MultipleChoice, // One correct option out of `options`
    FillBlank,      // Free text
    TrueFalse,      // 0 = true, 1 = false
}

/// A submitted or expected answer. Choice questions compare by index,
/// fill-in-the-blank questions by text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Answer {
    Choice(usize),
    Text(String),
}

impl Answer {
    pub const TRUE: Answer = Answer::Choice(0);
    pub const FALSE: Answer = Answer::Choice(1);

    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text(value.into())
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Answer::TRUE
        } else {
            Answer::FALSE
        }
    }

    /// An empty text answer renders the same as no selection.
    pub fn is_blank(&self) -> bool {
        matches!(self, Answer::Text(text) if text.is_empty())
    }
}

const TRUE_FALSE_LABELS: [&str; 2] = ["True", "False"];

impl QuizQuestion {
    pub fn multiple_choice(
        id: &str,
        prompt: &str,
        options: &[&str],
        correct_index: usize,
        explanation: &str,
    ) -> Self {
        QuizQuestion {
            id: id.to_string(),
            question_type: QuizQuestionType::MultipleChoice,
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: Answer::Choice(correct_index),
            explanation: explanation.to_string(),
        }
    }

    pub fn fill_blank(id: &str, prompt: &str, correct_text: &str, explanation: &str) -> Self {
        QuizQuestion {
            id: id.to_string(),
            question_type: QuizQuestionType::FillBlank,
            prompt: prompt.to_string(),
            options: Vec::new(),
            correct_answer: Answer::text(correct_text),
            explanation: explanation.to_string(),
        }
    }

    pub fn true_false(id: &str, prompt: &str, correct: bool, explanation: &str) -> Self {
        QuizQuestion {
            id: id.to_string(),
            question_type: QuizQuestionType::TrueFalse,
            prompt: prompt.to_string(),
            options: Vec::new(),
            correct_answer: Answer::from_bool(correct),
            explanation: explanation.to_string(),
        }
    }

    /// Labels a choice question renders, in index order. Empty for fill-in-the-blank.
    pub fn choice_labels(&self) -> Vec<&str> {
        match self.question_type {
            QuizQuestionType::MultipleChoice => self.options.iter().map(String::as_str).collect(),
            QuizQuestionType::TrueFalse => TRUE_FALSE_LABELS.to_vec(),
            QuizQuestionType::FillBlank => Vec::new(),
        }
    }

    /// Human readable form of an answer to this question.
    pub fn describe_answer(&self, answer: &Answer) -> String {
        match answer {
            Answer::Choice(index) => self
                .choice_labels()
                .get(*index)
                .map(|label| label.to_string())
                .unwrap_or_else(|| format!("option {}", index.saturating_add(1))),
            Answer::Text(text) => text.clone(),
        }
    }

    pub fn check_invariants(&self) -> AppResult<()> {
        if self.question_type != QuizQuestionType::MultipleChoice && !self.options.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question '{}' is {:?} and must not list options",
                self.id, self.question_type
            )));
        }

        match (self.question_type, &self.correct_answer) {
            (QuizQuestionType::MultipleChoice, Answer::Choice(index)) => {
                if self.options.is_empty() {
                    return Err(AppError::ValidationError(format!(
                        "Question '{}' is multiple choice but has no options",
                        self.id
                    )));
                }
                if *index >= self.options.len() {
                    return Err(AppError::ValidationError(format!(
                        "Question '{}' marks option {} correct but only has {} options",
                        self.id,
                        index,
                        self.options.len()
                    )));
                }
                Ok(())
            }
            (QuizQuestionType::TrueFalse, Answer::Choice(0 | 1)) => Ok(()),
            (QuizQuestionType::TrueFalse, Answer::Choice(index)) => {
                Err(AppError::ValidationError(format!(
                    "Question '{}' is true/false but its correct answer is {} (expected 0 or 1)",
                    self.id, index
                )))
            }
            (QuizQuestionType::FillBlank, Answer::Text(text)) if !text.trim().is_empty() => Ok(()),
            (QuizQuestionType::FillBlank, Answer::Text(_)) => Err(AppError::ValidationError(
                format!("Question '{}' has an empty expected answer", self.id),
            )),
            (question_type, answer) => Err(AppError::ValidationError(format!(
                "Question '{}' of type {:?} cannot have correct answer {:?}",
                self.id, question_type, answer
            ))),
        }
    }
}
