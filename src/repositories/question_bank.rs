use std::{collections::HashMap, path::Path, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    constants::sample_quizzes::SAMPLE_QUIZZES,
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::quiz_dto::QuestionBankDto,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionBank: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>>;
}

pub struct InMemoryQuestionBank {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuestionBank {
    pub fn new(quizzes: Vec<Quiz>) -> AppResult<Self> {
        let mut by_id = HashMap::with_capacity(quizzes.len());
        for quiz in quizzes {
            quiz.check_invariants()?;
            if by_id.contains_key(&quiz.id) {
                return Err(AppError::ValidationError(format!(
                    "Quiz with id '{}' appears more than once",
                    quiz.id
                )));
            }
            by_id.insert(quiz.id.clone(), quiz);
        }

        Ok(Self {
            quizzes: Arc::new(RwLock::new(by_id)),
        })
    }

    pub fn with_samples() -> AppResult<Self> {
        Self::new(SAMPLE_QUIZZES.clone())
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let bank: QuestionBankDto = serde_json::from_str(json)?;
        let quizzes = bank
            .quizzes
            .into_iter()
            .map(Quiz::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(quizzes)
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        log::info!("Loading question bank from {}", path.display());

        let json = tokio::fs::read_to_string(path).await?;
        let bank = Self::from_json(&json)?;

        log::info!(
            "Loaded {} quizzes from {}",
            bank.quizzes.read().await.len(),
            path.display()
        );
        Ok(bank)
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}
