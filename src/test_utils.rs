#[cfg(test)]
pub mod fixtures {
    use crate::constants::sample_quizzes::{PAST_PERFECT_QUIZ_ID, SAMPLE_QUIZZES};
    use crate::models::domain::{Answer, Quiz};

    /// The five question past perfect sample quiz
    pub fn past_perfect_quiz() -> Quiz {
        SAMPLE_QUIZZES
            .iter()
            .find(|q| q.id == PAST_PERFECT_QUIZ_ID)
            .cloned()
            .expect("past perfect sample quiz is built in")
    }

    /// Answers scoring 100% on [`past_perfect_quiz`], in question order
    pub fn perfect_answers() -> Vec<Answer> {
        vec![
            Answer::Choice(1),
            Answer::text("had seen"),
            Answer::TRUE,
            Answer::Choice(0),
            Answer::text("had started"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::grading::grade;
    use std::collections::BTreeMap;

    #[test]
    fn test_fixtures_past_perfect_quiz() {
        let quiz = past_perfect_quiz();
        assert_eq!(quiz.title, "Past Perfect Tense Quiz");
        assert_eq!(quiz.question_count(), 5);
    }

    #[test]
    fn test_fixtures_perfect_answers_score_full_marks() {
        let quiz = past_perfect_quiz();
        let answers: BTreeMap<_, _> = perfect_answers().into_iter().enumerate().collect();

        let report = grade(&quiz, &answers).expect("quiz has questions");
        assert_eq!(report.score_percent, 100);
    }
}
