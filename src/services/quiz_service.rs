use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::QuestionBank,
    services::{grading::AnswerMatching, quiz_session::QuizSession},
};

pub struct QuizService {
    repository: Arc<dyn QuestionBank>,
    matching: AnswerMatching,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuestionBank>, matching: AnswerMatching) -> Self {
        Self {
            repository,
            matching,
        }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    pub async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        self.repository.list_quizzes().await
    }

    pub async fn open_session(&self, id: &str) -> AppResult<QuizSession> {
        let quiz = self.get_quiz(id).await?;
        let session = QuizSession::new(Arc::new(quiz))?.with_matching(self.matching);

        log::info!("Opened session {} for quiz '{}'", session.id(), id);
        Ok(session)
    }
}
