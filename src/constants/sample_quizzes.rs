use once_cell::sync::Lazy;

use crate::models::domain::{Quiz, QuizQuestion};

pub const PAST_PERFECT_QUIZ_ID: &str = "past-perfect-quiz";
pub const PRESENT_SIMPLE_QUIZ_ID: &str = "present-simple-quiz";

/// Quizzes available when no question bank file is configured.
pub static SAMPLE_QUIZZES: Lazy<Vec<Quiz>> =
    Lazy::new(|| vec![past_perfect_quiz(), present_simple_quiz()]);

fn past_perfect_quiz() -> Quiz {
    Quiz::new(
        PAST_PERFECT_QUIZ_ID,
        "Past Perfect Tense Quiz",
        "Test your understanding of past perfect tense usage and formation",
        20,
        vec![
            QuizQuestion::multiple_choice(
                "1",
                "Choose the correct past perfect form: 'By the time I arrived, they _____ already left.'",
                &["have", "had", "has", "having"],
                1,
                "We use 'had' + past participle to form the past perfect tense.",
            ),
            QuizQuestion::fill_blank(
                "2",
                "Fill in the blank: 'She _____ never _____ such a beautiful sunset before.'",
                "had seen",
                "Past perfect is formed with 'had' + past participle. 'Seen' is the past participle of 'see'.",
            ),
            QuizQuestion::true_false(
                "3",
                "True or False: Past perfect is used for actions that happened before another past action.",
                true,
                "True. Past perfect shows that one action was completed before another action in the past.",
            ),
            QuizQuestion::multiple_choice(
                "4",
                "Which sentence uses past perfect correctly?",
                &[
                    "I had finished my homework when my friend called.",
                    "I have finished my homework when my friend called.",
                    "I finished my homework when my friend had called.",
                    "I was finishing my homework when my friend called.",
                ],
                0,
                "The first sentence correctly shows that finishing homework was completed before the friend called.",
            ),
            QuizQuestion::fill_blank(
                "5",
                "Complete the sentence: 'The movie _____ already _____ when we got to the theater.'",
                "had started",
                "Use 'had' + past participle to show the movie started before they arrived at the theater.",
            ),
        ],
    )
}

fn present_simple_quiz() -> Quiz {
    Quiz::new(
        PRESENT_SIMPLE_QUIZ_ID,
        "Present Simple Quiz",
        "Check your grasp of present simple forms and third person endings",
        15,
        vec![
            QuizQuestion::multiple_choice(
                "1",
                "Choose the correct form: 'She _____ to work every day.'",
                &["go", "goes", "going", "gone"],
                1,
                "Third person singular subjects take the -s/-es ending in present simple.",
            ),
            QuizQuestion::true_false(
                "2",
                "True or False: 'He don't like coffee' is correct present simple.",
                false,
                "False. The negative with he/she/it uses 'doesn't': 'He doesn't like coffee.'",
            ),
            QuizQuestion::fill_blank(
                "3",
                "Fill in the blank: 'Water _____ at 100 degrees Celsius.'",
                "boils",
                "Present simple describes general truths, and 'water' takes the third person ending.",
            ),
        ],
    )
}
