use std::sync::Arc;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answer, Attempt, GradeReport, Phase, Quiz, QuizQuestion};
use crate::models::dto::response::{ResultSummary, ReviewItem};
use crate::services::grading::{grade_with, AnswerMatching};
use crate::services::quiz_engine::QuizEngine;

/// The single owner of an attempt at one quiz.
pub struct QuizSession {
    id: Uuid,
    quiz: Arc<Quiz>,
    attempt: Attempt,
    matching: AnswerMatching,
}

impl QuizSession {
    pub fn new(quiz: Arc<Quiz>) -> AppResult<Self> {
        quiz.ensure_startable()?;
        let attempt = QuizEngine::fresh(&quiz);

        Ok(Self {
            id: Uuid::new_v4(),
            quiz,
            attempt,
            matching: AnswerMatching::default(),
        })
    }

    pub fn with_matching(mut self, matching: AnswerMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Snapshot of the current attempt.
    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn phase(&self) -> Phase {
        self.attempt.phase
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.quiz.questions[self.attempt.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.attempt.current_index + 1 == self.quiz.question_count()
    }

    /// The recorded answer for the current question, if any. Blank text
    /// counts as no selection.
    pub fn pending_answer(&self) -> Option<&Answer> {
        self.attempt
            .answer(self.attempt.current_index)
            .filter(|answer| !answer.is_blank())
    }

    pub fn start(&mut self) -> AppResult<&Attempt> {
        let next = QuizEngine::start(&self.quiz, &self.attempt);
        self.commit(next)
    }

    pub fn tick(&mut self) -> &Attempt {
        self.attempt = QuizEngine::tick(&self.quiz, &self.attempt);
        &self.attempt
    }

    pub fn record_answer(&mut self, index: usize, answer: Answer) -> AppResult<&Attempt> {
        let next = QuizEngine::record_answer(&self.quiz, &self.attempt, index, answer);
        self.commit(next)
    }

    /// Records `answer` for the current question, then advances (finishing
    /// the quiz on the last question). Nothing is applied if either step fails.
    pub fn submit_answer(&mut self, answer: Answer) -> AppResult<&Attempt> {
        if answer.is_blank() {
            return Err(AppError::ValidationError(
                "An answer must be selected before continuing".to_string(),
            ));
        }

        let recorded = QuizEngine::record_answer(
            &self.quiz,
            &self.attempt,
            self.attempt.current_index,
            answer,
        )?;
        let next = QuizEngine::advance(&self.quiz, &recorded);
        self.commit(next)
    }

    pub fn advance(&mut self) -> AppResult<&Attempt> {
        let next = QuizEngine::advance(&self.quiz, &self.attempt);
        self.commit(next)
    }

    pub fn retreat(&mut self) -> AppResult<&Attempt> {
        let next = QuizEngine::retreat(&self.attempt);
        self.commit(next)
    }

    pub fn finish_now(&mut self) -> AppResult<&Attempt> {
        let next = QuizEngine::finish_now(&self.quiz, &self.attempt);
        self.commit(next)
    }

    pub fn enter_review(&mut self) -> AppResult<&Attempt> {
        let next = QuizEngine::enter_review(&self.attempt);
        self.commit(next)
    }

    pub fn restart(&mut self) -> &Attempt {
        log::debug!("Session {} discarding attempt", self.id);
        self.attempt = QuizEngine::restart(&self.quiz, &self.attempt);
        &self.attempt
    }

    /// Grades the answers recorded so far. Meaningful once the attempt has finished.
    pub fn grade(&self) -> AppResult<GradeReport> {
        grade_with(&self.quiz, &self.attempt.answers, self.matching)
    }

    pub fn summary(&self, pass_threshold: u32) -> AppResult<ResultSummary> {
        self.require_finished("show results")?;
        let report = self.grade()?;
        Ok(ResultSummary::new(
            &self.quiz.title,
            &report,
            pass_threshold,
            self.attempt.timed_out(),
        ))
    }

    pub fn review(&self) -> AppResult<Vec<ReviewItem>> {
        self.require_finished("review answers")?;
        let report = self.grade()?;
        Ok(report
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| ReviewItem::from_result(index + 1, result))
            .collect())
    }

    fn require_finished(&self, operation: &'static str) -> AppResult<()> {
        if !self.attempt.is_finished() {
            return Err(AppError::InvalidState {
                operation,
                phase: self.attempt.phase,
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: AppResult<Attempt>) -> AppResult<&Attempt> {
        self.attempt = next?;
        Ok(&self.attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{past_perfect_quiz, perfect_answers};

    fn started_session() -> QuizSession {
        let mut session = QuizSession::new(Arc::new(past_perfect_quiz())).expect("non-empty quiz");
        session.start().expect("fresh session starts");
        session
    }

    #[test]
    fn new_session_rejects_empty_quiz() {
        let quiz = Quiz::new("empty", "Empty", "", 1, vec![]);

        let err = QuizSession::new(Arc::new(quiz)).err().expect("rejected");
        assert_eq!(err.error_code(), "DEGENERATE_QUIZ");
    }

    #[test]
    fn submit_answer_records_and_advances() {
        let mut session = started_session();

        session.submit_answer(Answer::Choice(1)).expect("running");

        assert_eq!(session.attempt().current_index, 1);
        assert_eq!(session.attempt().answer(0), Some(&Answer::Choice(1)));
    }

    #[test]
    fn submit_answer_on_last_question_finishes() {
        let mut session = started_session();

        for answer in perfect_answers() {
            session.submit_answer(answer).expect("running");
        }

        assert_eq!(session.phase(), Phase::Completed);
        let report = session.grade().expect("graded");
        assert_eq!(report.score_percent, 100);
    }

    #[test]
    fn submit_blank_answer_is_rejected_without_changes() {
        let mut session = started_session();
        let before = session.attempt().clone();

        assert!(session.submit_answer(Answer::text("")).is_err());
        assert_eq!(session.attempt(), &before);
    }

    #[test]
    fn retreat_restores_pending_answer() {
        let mut session = started_session();
        session.submit_answer(Answer::Choice(1)).expect("running");
        assert_eq!(session.pending_answer(), None);

        session.retreat().expect("running");

        assert_eq!(session.pending_answer(), Some(&Answer::Choice(1)));
        assert_eq!(session.current_question().id, "1");
    }

    #[test]
    fn rejected_transition_keeps_attempt() {
        let mut session = started_session();
        session.finish_now().expect("running");
        let before = session.attempt().clone();

        let err = session.advance().unwrap_err();

        assert_eq!(err.error_code(), "INVALID_STATE");
        assert_eq!(session.attempt(), &before);
    }

    #[test]
    fn review_requires_finished_attempt() {
        let session = started_session();

        assert!(session.review().is_err());
        assert!(session.summary(70).is_err());
    }

    #[test]
    fn review_lists_every_question_with_explanations() {
        let mut session = started_session();
        session.submit_answer(Answer::Choice(0)).expect("running");
        session.finish_now().expect("running");
        session.enter_review().expect("completed");

        let review = session.review().expect("reviewing");

        assert_eq!(review.len(), 5);
        assert_eq!(review[0].number, 1);
        assert!(!review[0].is_correct);
        assert_eq!(review[1].user_answer, None);
        assert!(review.iter().all(|item| !item.explanation.is_empty()));
    }

    #[test]
    fn review_survives_out_of_range_choice() {
        let mut session = started_session();
        session
            .record_answer(0, Answer::Choice(usize::MAX))
            .expect("any answer shape is stored");
        session.finish_now().expect("running");

        let review = session.review().expect("finished");

        assert!(!review[0].is_correct);
        assert!(review[0].options.iter().all(|o| !o.is_user_choice));
        assert_eq!(
            review[0].user_answer,
            Some(format!("option {}", usize::MAX))
        );
    }

    #[test]
    fn new_session_rejects_quiz_without_time_limit() {
        let quiz = Quiz::new("untimed", "Untimed", "", 0, past_perfect_quiz().questions);

        let err = QuizSession::new(Arc::new(quiz)).err().expect("rejected");
        assert_eq!(err.error_code(), "DEGENERATE_QUIZ");
    }

    #[test]
    fn summary_reports_timeout() {
        let quiz = Quiz {
            time_limit_seconds: 2,
            ..past_perfect_quiz()
        };
        let mut session = QuizSession::new(Arc::new(quiz)).expect("non-empty quiz");
        session.start().expect("fresh");
        session.submit_answer(Answer::Choice(1)).expect("running");

        session.tick();
        session.tick();
        session.tick();

        let summary = session.summary(70).expect("finished");
        assert!(summary.timed_out);
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.score_percent, 20);
        assert!(!summary.passed);
    }

    #[test]
    fn lenient_matching_accepts_capitalized_answer() {
        let mut session = QuizSession::new(Arc::new(past_perfect_quiz()))
            .expect("non-empty quiz")
            .with_matching(AnswerMatching::Lenient);
        session.start().expect("fresh");
        session.record_answer(1, Answer::text("Had Seen")).expect("running");
        session.finish_now().expect("running");

        let report = session.grade().expect("graded");
        assert!(report.results[1].is_correct);
    }

    #[test]
    fn restart_allows_a_second_attempt() {
        let mut session = started_session();
        session.submit_answer(Answer::Choice(1)).expect("running");
        session.tick();

        let restarted = session.restart().clone();

        assert_eq!(restarted, QuizEngine::fresh(session.quiz()));
        assert!(session.start().is_ok());
    }
}
