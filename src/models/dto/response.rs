use serde::Serialize;

use crate::models::domain::{Answer, GradeReport, QuestionResult, QuizQuestionType};

/// One rendered option of a choice question in the answer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOption {
    pub label: String,
    pub is_correct_option: bool,
    pub is_user_choice: bool,
}

/// Everything the review screen shows for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub number: usize,
    pub prompt: String,
    pub question_type: QuizQuestionType,
    pub options: Vec<ReviewOption>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: String,
}

impl ReviewItem {
    pub fn from_result(number: usize, result: &QuestionResult) -> Self {
        let question = &result.question;
        let options = question
            .choice_labels()
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let answer = Answer::Choice(index);
                ReviewOption {
                    label: label.to_string(),
                    is_correct_option: question.correct_answer == answer,
                    is_user_choice: result.user_answer.as_ref() == Some(&answer),
                }
            })
            .collect();

        ReviewItem {
            number,
            prompt: question.prompt.clone(),
            question_type: question.question_type,
            options,
            correct_answer: question.describe_answer(&question.correct_answer),
            user_answer: result
                .user_answer
                .as_ref()
                .filter(|answer| !answer.is_blank())
                .map(|answer| question.describe_answer(answer)),
            is_correct: result.is_correct,
            explanation: question.explanation.clone(),
        }
    }
}

/// Results screen headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub quiz_title: String,
    pub score_percent: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub passed: bool,
    pub timed_out: bool,
}

impl ResultSummary {
    pub fn new(quiz_title: &str, report: &GradeReport, pass_threshold: u32, timed_out: bool) -> Self {
        ResultSummary {
            quiz_title: quiz_title.to_string(),
            score_percent: report.score_percent,
            correct_count: report.correct_count,
            total_questions: report.total_questions,
            passed: report.passed(pass_threshold),
            timed_out,
        }
    }

    pub fn headline(&self) -> String {
        format!(
            "{}%: you got {} out of {} questions correct",
            self.score_percent, self.correct_count, self.total_questions
        )
    }
}
