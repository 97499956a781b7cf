use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::Answer;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Completed,
    Reviewing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::NotStarted => "not started",
            Phase::Running => "running",
            Phase::Completed => "completed",
            Phase::Reviewing => "reviewing",
        };
        f.write_str(label)
    }
}

/// Mutable state of one run through a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attempt {
    pub phase: Phase,
    pub current_index: usize,
    pub answers: BTreeMap<usize, Answer>,
    pub remaining_seconds: u32,
}

impl Attempt {
    /// A fresh attempt waiting for `start`.
    pub fn new(time_limit_seconds: u32) -> Self {
        Attempt {
            phase: Phase::NotStarted,
            current_index: 0,
            answers: BTreeMap::new(),
            remaining_seconds: time_limit_seconds,
        }
    }

    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(&index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| !a.is_blank()).count()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Completed | Phase::Reviewing)
    }

    pub fn timed_out(&self) -> bool {
        self.is_finished() && self.remaining_seconds == 0
    }
}
