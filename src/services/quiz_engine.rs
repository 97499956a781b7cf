use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answer, Attempt, Phase, Quiz};

/// Transitions of the quiz state machine.
///
/// Every transition takes the current attempt by reference and returns the
/// next one, so a rejected call can never leave a half-applied attempt
/// behind. The engine owns no clock: time only moves through [`tick`].
///
/// [`tick`]: QuizEngine::tick
pub struct QuizEngine;

impl QuizEngine {
    /// The attempt a quiz sits in before `start` and after `restart`.
    pub fn fresh(quiz: &Quiz) -> Attempt {
        Attempt::new(quiz.time_limit_seconds)
    }

    pub fn start(quiz: &Quiz, attempt: &Attempt) -> AppResult<Attempt> {
        require_phase(attempt, Phase::NotStarted, "start the quiz")?;
        quiz.ensure_startable()?;

        log::info!(
            "Starting quiz '{}' ({} questions, {}s)",
            quiz.id,
            quiz.question_count(),
            quiz.time_limit_seconds
        );

        Ok(Attempt {
            phase: Phase::Running,
            ..Self::fresh(quiz)
        })
    }

    /// One elapsed second. Outside `Running` this is a no-op, which makes
    /// replayed or late ticks harmless.
    pub fn tick(quiz: &Quiz, attempt: &Attempt) -> Attempt {
        if attempt.phase != Phase::Running {
            log::debug!("Ignoring tick for quiz '{}' while {}", quiz.id, attempt.phase);
            return attempt.clone();
        }

        let mut next = attempt.clone();
        next.remaining_seconds = next.remaining_seconds.saturating_sub(1);
        if next.remaining_seconds == 0 {
            log::info!(
                "Quiz '{}' timed out on question {}",
                quiz.id,
                next.current_index + 1
            );
            next.phase = Phase::Completed;
        }
        next
    }

    pub fn record_answer(
        quiz: &Quiz,
        attempt: &Attempt,
        index: usize,
        answer: Answer,
    ) -> AppResult<Attempt> {
        require_phase(attempt, Phase::Running, "record an answer")?;
        quiz.question(index)?;

        let mut next = attempt.clone();
        next.answers.insert(index, answer);
        Ok(next)
    }

    /// Moves to the next question, or completes the attempt on the last one.
    pub fn advance(quiz: &Quiz, attempt: &Attempt) -> AppResult<Attempt> {
        require_phase(attempt, Phase::Running, "advance")?;

        if attempt.current_index + 1 >= quiz.question_count() {
            return Ok(Self::complete(quiz, attempt));
        }

        Ok(Attempt {
            current_index: attempt.current_index + 1,
            ..attempt.clone()
        })
    }

    /// Steps back one question. On the first question the attempt is returned unchanged.
    pub fn retreat(attempt: &Attempt) -> AppResult<Attempt> {
        require_phase(attempt, Phase::Running, "go back")?;

        Ok(Attempt {
            current_index: attempt.current_index.saturating_sub(1),
            ..attempt.clone()
        })
    }

    pub fn finish_now(quiz: &Quiz, attempt: &Attempt) -> AppResult<Attempt> {
        require_phase(attempt, Phase::Running, "finish")?;
        Ok(Self::complete(quiz, attempt))
    }

    pub fn enter_review(attempt: &Attempt) -> AppResult<Attempt> {
        require_phase(attempt, Phase::Completed, "enter review")?;

        Ok(Attempt {
            phase: Phase::Reviewing,
            ..attempt.clone()
        })
    }

    /// Valid from any phase; discards everything recorded so far.
    pub fn restart(quiz: &Quiz, attempt: &Attempt) -> Attempt {
        log::info!("Restarting quiz '{}' from {}", quiz.id, attempt.phase);
        Self::fresh(quiz)
    }

    fn complete(quiz: &Quiz, attempt: &Attempt) -> Attempt {
        log::info!(
            "Quiz '{}' completed with {}s remaining ({} of {} answered)",
            quiz.id,
            attempt.remaining_seconds,
            attempt.answered_count(),
            quiz.question_count()
        );

        Attempt {
            phase: Phase::Completed,
            ..attempt.clone()
        }
    }
}

fn require_phase(attempt: &Attempt, expected: Phase, operation: &'static str) -> AppResult<()> {
    if attempt.phase != expected {
        log::warn!("Rejected attempt to {} while {}", operation, attempt.phase);
        return Err(AppError::InvalidState {
            operation,
            phase: attempt.phase,
        });
    }
    Ok(())
}
