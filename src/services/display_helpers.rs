use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answer, QuizQuestion, QuizQuestionType};

/// Formats remaining seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Whether the countdown should be rendered as a warning.
pub fn is_low_time(seconds: u32, threshold: u32) -> bool {
    seconds < threshold
}

/// Progress through the quiz, counting the current question as reached.
pub fn progress_percent(current_index: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (((current_index + 1).min(total) * 100) / total) as u32
}

/// Turns raw terminal input into an answer for `question`.
///
/// Choice questions take 1-based option numbers; true/false questions also
/// accept `t`, `f`, `true` and `false`. Fill-in-the-blank input is kept
/// verbatim so grading sees exactly what was typed.
pub fn parse_answer_input(question: &QuizQuestion, raw: &str) -> AppResult<Answer> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(AppError::ValidationError("No answer selected".to_string()));
    }

    match question.question_type {
        QuizQuestionType::FillBlank => Ok(Answer::text(raw.trim_end_matches(['\r', '\n']))),
        QuizQuestionType::TrueFalse => match input.to_lowercase().as_str() {
            "t" | "true" | "1" => Ok(Answer::TRUE),
            "f" | "false" | "2" => Ok(Answer::FALSE),
            other => Err(AppError::ValidationError(format!(
                "'{}' is not true or false",
                other
            ))),
        },
        QuizQuestionType::MultipleChoice => {
            let number: usize = input.parse().map_err(|_| {
                AppError::ValidationError(format!("'{}' is not an option number", input))
            })?;
            if number == 0 || number > question.options.len() {
                return Err(AppError::ValidationError(format!(
                    "Choose an option between 1 and {}",
                    question.options.len()
                )));
            }
            Ok(Answer::Choice(number - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1200), "20:00");
        assert_eq!(format_time(299), "4:59");
        assert_eq!(format_time(5), "0:05");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_is_low_time() {
        assert!(is_low_time(299, 300));
        assert!(!is_low_time(300, 300));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 5), 20);
        assert_eq!(progress_percent(4, 5), 100);
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_parse_multiple_choice() {
        let question = QuizQuestion::multiple_choice("1", "Pick", &["a", "b", "c"], 0, "");

        assert_eq!(parse_answer_input(&question, "2"), Ok(Answer::Choice(1)));
        assert!(parse_answer_input(&question, "0").is_err());
        assert!(parse_answer_input(&question, "4").is_err());
        assert!(parse_answer_input(&question, "b").is_err());
    }

    #[test]
    fn test_parse_true_false() {
        let question = QuizQuestion::true_false("1", "Statement", true, "");

        assert_eq!(parse_answer_input(&question, "T"), Ok(Answer::TRUE));
        assert_eq!(parse_answer_input(&question, "false"), Ok(Answer::FALSE));
        assert!(parse_answer_input(&question, "maybe").is_err());
    }

    #[test]
    fn test_parse_fill_blank_keeps_text() {
        let question = QuizQuestion::fill_blank("1", "Fill", "had seen", "");

        assert_eq!(
            parse_answer_input(&question, " had seen\n"),
            Ok(Answer::text(" had seen"))
        );
        assert!(parse_answer_input(&question, "   ").is_err());
    }
}
