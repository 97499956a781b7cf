use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_question::QuizQuestion;

/// A loaded quiz. Questions are fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time_limit_seconds: u32,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        time_limit_minutes: u32,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Quiz {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            time_limit_seconds: time_limit_minutes.saturating_mul(60),
            questions,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_seconds / 60
    }

    pub fn question(&self, index: usize) -> AppResult<&QuizQuestion> {
        self.questions.get(index).ok_or(AppError::IndexOutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    pub fn ensure_not_empty(&self) -> AppResult<()> {
        if self.questions.is_empty() {
            return Err(AppError::DegenerateQuiz(format!(
                "Quiz '{}' has no questions",
                self.id
            )));
        }
        Ok(())
    }

    /// A quiz can only be started with questions and a countdown to run.
    pub fn ensure_startable(&self) -> AppResult<()> {
        self.ensure_not_empty()?;
        if self.time_limit_seconds == 0 {
            return Err(AppError::DegenerateQuiz(format!(
                "Quiz '{}' has no time limit",
                self.id
            )));
        }
        Ok(())
    }

    /// Checks every question plus id uniqueness within the quiz.
    pub fn check_invariants(&self) -> AppResult<()> {
        self.ensure_startable()?;

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Quiz '{}' contains duplicate question id '{}'",
                    self.id, question.id
                )));
            }
            question.check_invariants()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_quiz() -> Quiz {
        Quiz::new(
            "quiz-1",
            "Quiz",
            "Two questions",
            20,
            vec![
                QuizQuestion::true_false("1", "A statement", true, "Because"),
                QuizQuestion::fill_blank("2", "Fill it", "had seen", "Because"),
            ],
        )
    }

    #[test]
    fn time_limit_is_derived_from_minutes() {
        let quiz = two_question_quiz();

        assert_eq!(quiz.time_limit_seconds, 1200);
        assert_eq!(quiz.time_limit_minutes(), 20);
    }

    #[test]
    fn question_lookup_reports_out_of_range() {
        let quiz = two_question_quiz();

        assert!(quiz.question(1).is_ok());
        assert_eq!(
            quiz.question(2).unwrap_err(),
            AppError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn empty_quiz_is_degenerate() {
        let quiz = Quiz::new("empty", "Empty", "", 5, vec![]);

        assert_eq!(
            quiz.check_invariants().unwrap_err().error_code(),
            "DEGENERATE_QUIZ"
        );
    }

    #[test]
    fn zero_time_limit_is_degenerate() {
        let quiz = Quiz::new("untimed", "Untimed", "", 0, two_question_quiz().questions);

        assert_eq!(
            quiz.check_invariants().unwrap_err(),
            AppError::DegenerateQuiz("Quiz 'untimed' has no time limit".to_string())
        );
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let mut quiz = two_question_quiz();
        quiz.questions[1].id = "1".to_string();

        assert_eq!(
            quiz.check_invariants().unwrap_err().error_code(),
            "VALIDATION_ERROR"
        );
    }
}
