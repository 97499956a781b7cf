pub mod question_bank;

pub use question_bank::{InMemoryQuestionBank, QuestionBank};
