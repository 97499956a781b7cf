use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answer, GradeReport, QuestionResult, Quiz, QuizQuestion};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

/// How fill-in-the-blank text is compared against the expected answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnswerMatching {
    /// Byte-for-byte equality.
    Exact,
    /// Leading and trailing whitespace ignored, case-sensitive.
    #[default]
    Trimmed,
    /// Case-insensitive, with internal whitespace runs collapsed.
    Lenient,
}

impl AnswerMatching {
    pub fn matches(&self, submitted: &str, expected: &str) -> bool {
        match self {
            AnswerMatching::Exact => submitted == expected,
            AnswerMatching::Trimmed => submitted.trim() == expected.trim(),
            AnswerMatching::Lenient => normalize(submitted) == normalize(expected),
        }
    }
}

fn normalize(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

impl FromStr for AnswerMatching {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "exact" => Ok(AnswerMatching::Exact),
            "trimmed" => Ok(AnswerMatching::Trimmed),
            "lenient" => Ok(AnswerMatching::Lenient),
            other => Err(AppError::ValidationError(format!(
                "Unknown fill-blank matching mode '{}'",
                other
            ))),
        }
    }
}

/// Grade `answers` against `quiz` with the default matching policy.
pub fn grade(quiz: &Quiz, answers: &BTreeMap<usize, Answer>) -> AppResult<GradeReport> {
    grade_with(quiz, answers, AnswerMatching::default())
}

pub fn grade_with(
    quiz: &Quiz,
    answers: &BTreeMap<usize, Answer>,
    matching: AnswerMatching,
) -> AppResult<GradeReport> {
    quiz.ensure_not_empty()?;

    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_answer = answers.get(&index).cloned();
            let is_correct = user_answer
                .as_ref()
                .is_some_and(|answer| is_correct(question, answer, matching));
            QuestionResult {
                question: question.clone(),
                user_answer,
                is_correct,
            }
        })
        .collect();

    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let total_questions = results.len();

    Ok(GradeReport {
        results,
        correct_count,
        total_questions,
        score_percent: score_percent(correct_count, total_questions),
    })
}

fn is_correct(question: &QuizQuestion, answer: &Answer, matching: AnswerMatching) -> bool {
    match (&question.correct_answer, answer) {
        (Answer::Choice(expected), Answer::Choice(given)) => expected == given,
        (Answer::Text(expected), Answer::Text(given)) => matching.matches(given, expected),
        // A text answer to a choice question, or the reverse
        _ => false,
    }
}

/// Percentage rounded half-up. `total` must be non-zero.
fn score_percent(correct: usize, total: usize) -> u32 {
    ((correct * 200 + total) / (total * 2)) as u32
}
