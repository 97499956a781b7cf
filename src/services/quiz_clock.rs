use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Paces one engine tick per `period` of wall-clock time.
///
/// The clock is only polled while an attempt is running. Missed ticks are
/// delayed rather than replayed, and [`reset`] must be called when an
/// attempt starts so idle time before it is never charged to the countdown.
///
/// [`reset`]: QuizClock::reset
pub struct QuizClock {
    interval: Interval,
}

impl QuizClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Next tick fires one full period from now.
    pub fn reset(&mut self) {
        self.interval.reset();
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::domain::Phase;
    use crate::services::quiz_session::QuizSession;
    use crate::test_utils::fixtures::past_perfect_quiz;

    const PERIOD: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_a_full_period() {
        let mut clock = QuizClock::new(PERIOD);
        let started = Instant::now();

        clock.tick().await;

        assert!(started.elapsed() >= PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_time_before_start_is_not_charged() {
        let mut clock = QuizClock::new(PERIOD);
        let mut session = QuizSession::new(Arc::new(past_perfect_quiz())).expect("non-empty quiz");

        // sitting on the intro screen for twenty periods
        time::advance(PERIOD * 20).await;
        session.start().expect("fresh session starts");
        clock.reset();

        let early = time::timeout(PERIOD / 2, clock.tick()).await;
        assert!(early.is_err(), "no tick may fire right after start");

        clock.tick().await;
        session.tick();

        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.attempt().remaining_seconds, 1199);
    }

    #[tokio::test(start_paused = true)]
    async fn missed_ticks_are_not_replayed_in_a_burst() {
        let mut clock = QuizClock::new(PERIOD);
        clock.tick().await;

        time::advance(PERIOD * 5).await;
        clock.tick().await;
        let after_late_tick = Instant::now();
        clock.tick().await;

        assert!(after_late_tick.elapsed() >= PERIOD);
    }
}
