use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;
use crate::models::domain::quiz_question::{Answer, QuizQuestionType};
use crate::models::domain::{Quiz, QuizQuestion};

/// Question record as it appears in a question bank file.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
	#[validate(length(min = 1, max = 64))]
	pub id: String,
	#[serde(rename = "type")]
	pub question_type: QuizQuestionType,
	#[validate(length(min = 1, max = 1000))]
	pub question: String,
	#[serde(default)]
	pub options: Option<Vec<String>>,
	pub correct_answer: Answer,
	#[serde(default)]
	pub explanation: String,
}

impl From<QuizQuestion> for QuizQuestionDto {
	fn from(question: QuizQuestion) -> Self {
		QuizQuestionDto {
			id: question.id,
			question_type: question.question_type,
			question: question.prompt,
			options: if question.options.is_empty() {
				None
			} else {
				Some(question.options)
			},
			correct_answer: question.correct_answer,
			explanation: question.explanation,
		}
	}
}

impl TryFrom<QuizQuestionDto> for QuizQuestion {
	type Error = AppError;

	fn try_from(dto: QuizQuestionDto) -> Result<Self, Self::Error> {
		dto.validate()?;

		let question = QuizQuestion {
			id: dto.id,
			question_type: dto.question_type,
			prompt: dto.question,
			options: dto.options.unwrap_or_default(),
			correct_answer: dto.correct_answer,
			explanation: dto.explanation,
		};
		question.check_invariants()?;

		Ok(question)
	}
}

/// Quiz record as it appears in a question bank file. The time limit is
/// configured in minutes.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
	#[validate(length(min = 1, max = 64))]
	pub id: String,
	#[validate(length(min = 1, max = 200))]
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[validate(range(min = 1, max = 600))]
	pub time_limit: u32,
	#[validate(length(min = 1), nested)]
	pub questions: Vec<QuizQuestionDto>,
}

impl From<Quiz> for QuizDto {
	fn from(quiz: Quiz) -> Self {
		QuizDto {
			id: quiz.id,
			title: quiz.title,
			description: quiz.description,
			time_limit: quiz.time_limit_seconds / 60,
			questions: quiz.questions.into_iter().map(QuizQuestionDto::from).collect(),
		}
	}
}

impl TryFrom<QuizDto> for Quiz {
	type Error = AppError;

	fn try_from(dto: QuizDto) -> Result<Self, Self::Error> {
		dto.validate()?;

		let questions = dto
			.questions
			.into_iter()
			.map(QuizQuestion::try_from)
			.collect::<Result<Vec<_>, AppError>>()?;

		let quiz = Quiz::new(&dto.id, &dto.title, &dto.description, dto.time_limit, questions);
		quiz.check_invariants()?;

		Ok(quiz)
	}
}

/// Top level shape of a question bank file.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
pub struct QuestionBankDto {
	#[validate(nested)]
	pub quizzes: Vec<QuizDto>,
}

impl QuestionBankDto {
	pub fn json_schema() -> schemars::Schema {
		schemars::schema_for!(QuestionBankDto)
	}
}
