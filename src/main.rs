use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use quiz_engine::config::Config;
use quiz_engine::errors::AppResult;
use quiz_engine::models::domain::{Phase, QuizQuestionType};
use quiz_engine::models::dto::quiz_dto::QuestionBankDto;
use quiz_engine::repositories::{InMemoryQuestionBank, QuestionBank};
use quiz_engine::services::display_helpers::{
    format_time, is_low_time, parse_answer_input, progress_percent,
};
use quiz_engine::services::quiz_clock::QuizClock;
use quiz_engine::services::quiz_service::QuizService;
use quiz_engine::services::quiz_session::QuizSession;

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    config.validate()?;

    let bank: Arc<dyn QuestionBank> = match &config.question_bank_path {
        Some(path) => Arc::new(InMemoryQuestionBank::from_json_file(path).await?),
        None => Arc::new(InMemoryQuestionBank::with_samples()?),
    };
    let service = QuizService::new(bank, config.fill_blank_matching);

    for quiz in service.list_quizzes().await? {
        log::info!("Available quiz '{}': {}", quiz.id, quiz.title);
    }

    let mut session = service.open_session(&config.default_quiz_id).await?;
    print_intro(&session);

    let mut clock = QuizClock::new(Duration::from_millis(config.tick_interval_ms));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = clock.tick(), if session.phase() == Phase::Running => {
                let attempt = session.tick();
                if attempt.phase == Phase::Completed {
                    println!("\nTime is up!");
                    print_results(&session, &config);
                } else if attempt.remaining_seconds % 60 == 0
                    || (is_low_time(attempt.remaining_seconds, config.low_time_warning_seconds)
                        && attempt.remaining_seconds % 30 == 0)
                {
                    println!("[{} left]", format_time(attempt.remaining_seconds));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_command(&mut session, &mut clock, &config, &line) {
                    break;
                }
            }
        }
    }

    log::info!("Session {} closed", session.id());
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_command(
    session: &mut QuizSession,
    clock: &mut QuizClock,
    config: &Config,
    line: &str,
) -> bool {
    let command = line.trim().to_lowercase();
    let result = match command.as_str() {
        "quit" | "exit" => return false,
        "start" => session.start().map(|_| clock.reset()),
        "next" => session.advance().map(|_| ()),
        "prev" | "back" => session.retreat().map(|_| ()),
        "finish" => session.finish_now().map(|_| ()),
        "review" => session.enter_review().map(|_| ()),
        "restart" => {
            session.restart();
            clock.reset();
            Ok(())
        }
        "schema" => {
            match serde_json::to_string_pretty(&QuestionBankDto::json_schema()) {
                Ok(schema) => println!("{}", schema),
                Err(err) => log::error!("Could not render question bank schema: {}", err),
            }
            return true;
        }
        _ if session.phase() == Phase::Running => {
            parse_answer_input(session.current_question(), line)
                .and_then(|answer| session.submit_answer(answer).map(|_| ()))
        }
        _ => {
            println!("Unknown command '{}'", line.trim());
            return true;
        }
    };

    if let Err(err) = result {
        if err.is_contract_violation() {
            log::warn!("Session {} rejected '{}': {}", session.id(), line.trim(), err);
        }
        println!("{}", err);
        return true;
    }

    match session.phase() {
        Phase::NotStarted => print_intro(session),
        Phase::Running => print_question(session, config),
        Phase::Completed => print_results(session, config),
        Phase::Reviewing => print_review(session),
    }
    true
}

fn print_intro(session: &QuizSession) {
    let quiz = session.quiz();
    println!("\n{}\n{}", quiz.title, quiz.description);
    println!(
        "{} questions, {} minutes. Type 'start' to begin.",
        quiz.question_count(),
        quiz.time_limit_minutes()
    );
}

fn print_question(session: &QuizSession, config: &Config) {
    let attempt = session.attempt();
    let question = session.current_question();
    let total = session.quiz().question_count();
    let warning = if is_low_time(attempt.remaining_seconds, config.low_time_warning_seconds) {
        " (hurry!)"
    } else {
        ""
    };

    println!(
        "\nQuestion {} of {} [{}%] - {}{}",
        attempt.current_index + 1,
        total,
        progress_percent(attempt.current_index, total),
        format_time(attempt.remaining_seconds),
        warning
    );
    println!("{}", question.prompt);
    for (index, label) in question.choice_labels().iter().enumerate() {
        println!("  {}. {}", index + 1, label);
    }
    if question.question_type == QuizQuestionType::FillBlank {
        println!("  (type your answer)");
    }
    if let Some(answer) = session.pending_answer() {
        println!("  current answer: {}", question.describe_answer(answer));
    }
    let action = if session.is_last_question() { "finish the quiz" } else { "continue" };
    println!("Answer to {}, or 'prev' / 'next' / 'finish'.", action);
}

fn print_results(session: &QuizSession, config: &Config) {
    match session.summary(config.pass_threshold_percent) {
        Ok(summary) => {
            println!("\n{} results", summary.quiz_title);
            println!("{}", summary.headline());
            println!("{}", if summary.passed { "Passed!" } else { "Keep practicing." });
            if let Ok(report) = session.grade() {
                let missed: Vec<_> = report.incorrect().map(|r| r.question.id.as_str()).collect();
                if !missed.is_empty() {
                    println!("Missed questions: {}", missed.join(", "));
                }
            }
            println!("Type 'review' to see answers or 'restart' to retake the quiz.");
        }
        Err(err) => log::error!("Could not grade session {}: {}", session.id(), err),
    }
}

fn print_review(session: &QuizSession) {
    let review = match session.review() {
        Ok(review) => review,
        Err(err) => {
            log::error!("Could not build review for session {}: {}", session.id(), err);
            return;
        }
    };

    for item in review {
        let mark = if item.is_correct { "correct" } else { "incorrect" };
        println!("\nQuestion {} ({})\n{}", item.number, mark, item.prompt);
        for option in &item.options {
            let tag = match (option.is_correct_option, option.is_user_choice) {
                (true, _) => " <- correct",
                (false, true) => " <- your answer",
                (false, false) => "",
            };
            println!("  - {}{}", option.label, tag);
        }
        if item.options.is_empty() {
            println!("  Correct answer: {}", item.correct_answer);
            if let Some(answer) = item.user_answer.as_ref().filter(|_| !item.is_correct) {
                println!("  Your answer: {}", answer);
            }
        }
        println!("  Explanation: {}", item.explanation);
    }
    println!("\nType 'restart' to retake the quiz or 'quit' to leave.");
}
