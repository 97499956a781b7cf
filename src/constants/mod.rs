pub mod sample_quizzes;
