use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::{Answer, QuizQuestion};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionResult {
    pub question: QuizQuestion,
    pub user_answer: Option<Answer>,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradeReport {
    pub results: Vec<QuestionResult>,
    pub correct_count: usize,
    pub total_questions: usize,
    pub score_percent: u32,
}

impl GradeReport {
    pub fn passed(&self, threshold_percent: u32) -> bool {
        self.score_percent >= threshold_percent
    }

    pub fn incorrect(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| !r.is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report(score_percent: u32) -> GradeReport {
        GradeReport {
            results: vec![
                QuestionResult {
                    question: QuizQuestion::true_false("1", "A", true, ""),
                    user_answer: Some(Answer::TRUE),
                    is_correct: true,
                },
                QuestionResult {
                    question: QuizQuestion::true_false("2", "B", true, ""),
                    user_answer: None,
                    is_correct: false,
                },
            ],
            correct_count: 1,
            total_questions: 2,
            score_percent,
        }
    }

    #[test]
    fn passed_is_inclusive_of_threshold() {
        assert!(make_report(70).passed(70));
        assert!(!make_report(69).passed(70));
    }

    #[test]
    fn incorrect_lists_only_misses() {
        let report = make_report(50);
        let misses: Vec<_> = report.incorrect().map(|r| r.question.id.as_str()).collect();

        assert_eq!(misses, vec!["2"]);
    }
}
