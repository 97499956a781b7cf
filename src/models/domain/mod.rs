pub mod grade_report;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub use grade_report::{GradeReport, QuestionResult};
pub use quiz::Quiz;
pub use quiz_attempt::{Attempt, Phase};
pub use quiz_question::{Answer, QuizQuestion, QuizQuestionType};
