use std::io::Write;

use crate::app_state::AppState;
use crate::errors::AppResult;
use crate::models::dto::request::{GenerateQuizRequest, QUESTION_COUNT_CHOICES};
use crate::session::{SessionPhase, SubmitOutcome};

/// Drives the terminal loop until the user quits or stdin closes.
pub async fn run(state: AppState) -> AppResult<()> {
    println!("Quizify");

    loop {
        let keep_going = match state.phase().await {
            SessionPhase::Setup => setup_screen(&state).await?,
            SessionPhase::Playing => playing_screen(&state).await?,
            SessionPhase::Finished => finished_screen(&state).await?,
            SessionPhase::Loading => {
                // Not normally observed: the setup screen awaits the load
                // inline. Back off instead of spinning if it ever is.
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                true
            }
        };
        if !keep_going {
            println!("Goodbye.");
            return Ok(());
        }
    }
}

async fn setup_screen(state: &AppState) -> AppResult<bool> {
    println!();
    println!("Credential: {}", state.credentials.status().await);

    let history = state.prompt_history().await;
    if !history.is_empty() {
        println!("Saved prompts:");
        for (position, entry) in history.iter().enumerate() {
            println!("  #{} {}", position + 1, entry.text);
        }
    }
    println!(
        "Enter a topic, #N to reuse a saved prompt, :key to manage the API key, \
         :drop N to delete a saved prompt, :quit to exit."
    );

    let line = match read_line("> ")? {
        Some(line) => line,
        None => return Ok(false),
    };

    let topic = match parse_setup_command(&line) {
        SetupCommand::Quit => return Ok(false),
        SetupCommand::Nothing => return Ok(true),
        SetupCommand::Unknown => {
            println!("Unknown command.");
            return Ok(true);
        }
        SetupCommand::ManageKey => return credential_screen(state).await,
        SetupCommand::DropPrompt(position) => {
            match history.get(position) {
                Some(entry) => {
                    if let Err(err) = state.prompts.remove(&entry.text).await {
                        state.notifier.error(&err.to_string());
                    } else {
                        state.notifier.info("Saved prompt removed.");
                    }
                }
                None => println!("No saved prompt #{}.", position + 1),
            }
            return Ok(true);
        }
        SetupCommand::ReusePrompt(position) => match history.get(position) {
            Some(entry) => entry.text.clone(),
            None => {
                println!("No saved prompt #{}.", position + 1);
                return Ok(true);
            }
        },
        SetupCommand::Topic(topic) => topic,
    };

    let count = loop {
        let choices = QUESTION_COUNT_CHOICES.map(|count| count.to_string()).join("/");
        let line = match read_line(&format!("Questions [{}] (default {}): ", choices, QUESTION_COUNT_CHOICES[0]))? {
            Some(line) => line,
            None => return Ok(false),
        };
        if is_quit(&line) {
            return Ok(false);
        }
        match parse_question_count(&line) {
            Some(count) => break count,
            None => println!("Pick one of {}.", choices),
        }
    };

    let default_model = state.config.default_model();
    let line = match read_line(&format!(
        "Model [{}] (default {}): ",
        state.config.models.join("/"),
        default_model
    ))? {
        Some(line) => line,
        None => return Ok(false),
    };
    if is_quit(&line) {
        return Ok(false);
    }
    let model = or_default(line, default_model);

    let line = match read_line(&format!(
        "Difficulty [{}] (default {}): ",
        state.config.difficulty_policy.labels().join("/"),
        state.config.default_difficulty
    ))? {
        Some(line) => line,
        None => return Ok(false),
    };
    if is_quit(&line) {
        return Ok(false);
    }
    let difficulty = or_default(line, &state.config.default_difficulty);

    println!("Generating your quiz...");
    let request = GenerateQuizRequest::new(&topic, count, &model, &difficulty);
    match state.start_quiz(request).await {
        Ok(()) => Ok(true),
        // A rejected or absent key is fixable on the spot; everything else
        // was already surfaced through the notifier.
        Err(err) if err.is_credential_failure() => credential_screen(state).await,
        Err(_) => Ok(true),
    }
}

async fn playing_screen(state: &AppState) -> AppResult<bool> {
    let (index, question) = match state.current_question().await {
        Some(current) => current,
        None => return Ok(true),
    };
    let total = state.total_questions().await;

    println!();
    println!("Question {}/{}: {}", question.number, total, question.text);
    // One shuffle per presentation; re-entering the screen deals the
    // answers in a fresh order.
    let answers = question.shuffled_answers(&mut rand::thread_rng());
    for (position, answer) in answers.iter().enumerate() {
        println!("  {}. {}", position + 1, answer);
    }

    let choice = loop {
        let line = match read_line(&format!("Your answer [1-{}]: ", answers.len()))? {
            Some(line) => line,
            None => return Ok(false),
        };
        if is_quit(&line) {
            return Ok(false);
        }
        match parse_choice(&line, answers.len()) {
            Some(choice) => break choice,
            None => println!("Pick a number between 1 and {}.", answers.len()),
        }
    };

    match state.submit_answer(index, &answers[choice]).await? {
        SubmitOutcome::Recorded { is_correct, .. } => {
            if is_correct {
                println!("Correct!");
            } else {
                println!("Incorrect.");
            }
        }
        SubmitOutcome::Ignored => {}
    }
    Ok(true)
}

async fn finished_screen(state: &AppState) -> AppResult<bool> {
    let summary = state.summary().await?;

    println!();
    println!("You scored {}.", summary.score_line());
    for review in &summary.per_question {
        let mark = if review.is_correct { "+" } else { "-" };
        println!("  {} Q{}: {}", mark, review.question_number, review.question);
        println!("    your answer: {}", review.answer);
        if let Some(correct) = review.revealed_answer(state.config.reveal_policy) {
            println!("    correct answer: {}", correct);
        }
    }

    let line = match read_line("Play again? [Y/n]: ")? {
        Some(line) => line,
        None => return Ok(false),
    };
    if parse_yes_no(&line, true) {
        state.restart().await;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn credential_screen(state: &AppState) -> AppResult<bool> {
    println!();
    println!("API credential: {}", state.credentials.status().await);
    println!("Paste an API key, :forget to delete the saved one, or press Enter to go back.");

    let line = match read_line("Key: ")? {
        Some(line) => line,
        None => return Ok(false),
    };
    if line.is_empty() {
        return Ok(true);
    }
    if line == ":forget" {
        match state.credentials.forget().await {
            Ok(()) => state.notifier.info("Credential forgotten."),
            Err(err) => state.notifier.error(&err.to_string()),
        }
        return Ok(true);
    }

    let save = match read_line("Save it encrypted for next time? [y/N]: ")? {
        Some(answer) => parse_yes_no(&answer, false),
        None => return Ok(false),
    };
    let outcome = if save {
        state.credentials.remember(&line).await.map(|()| "Credential saved.")
    } else {
        state
            .credentials
            .use_for_session(&line)
            .await
            .map(|()| "Credential kept for this session only.")
    };
    match outcome {
        Ok(message) => state.notifier.info(message),
        Err(err) => state.notifier.error(&err.to_string()),
    }
    Ok(true)
}

// Returns None when stdin is closed.
fn read_line(label: &str) -> AppResult<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[derive(Debug, PartialEq, Eq)]
enum SetupCommand {
    Quit,
    ManageKey,
    /// Zero-based index into the prompt history.
    DropPrompt(usize),
    /// Zero-based index into the prompt history.
    ReusePrompt(usize),
    Topic(String),
    Nothing,
    Unknown,
}

fn is_quit(line: &str) -> bool {
    line == ":quit" || line == ":q"
}

// Empty input keeps the configured default.
fn or_default(line: String, default: &str) -> String {
    if line.is_empty() {
        default.to_string()
    } else {
        line
    }
}

fn parse_setup_command(line: &str) -> SetupCommand {
    let line = line.trim();
    if line.is_empty() {
        return SetupCommand::Nothing;
    }
    if is_quit(line) {
        return SetupCommand::Quit;
    }
    if line == ":key" {
        return SetupCommand::ManageKey;
    }
    if let Some(rest) = line.strip_prefix(":drop") {
        return match rest.trim().parse::<usize>() {
            Ok(position) if position >= 1 => SetupCommand::DropPrompt(position - 1),
            _ => SetupCommand::Unknown,
        };
    }
    if let Some(rest) = line.strip_prefix('#') {
        return match rest.trim().parse::<usize>() {
            Ok(position) if position >= 1 => SetupCommand::ReusePrompt(position - 1),
            _ => SetupCommand::Unknown,
        };
    }
    if line.starts_with(':') {
        return SetupCommand::Unknown;
    }
    SetupCommand::Topic(line.to_string())
}

fn parse_question_count(line: &str) -> Option<u8> {
    let line = line.trim();
    if line.is_empty() {
        return Some(QUESTION_COUNT_CHOICES[0]);
    }
    match line.parse::<u8>() {
        Ok(count) if QUESTION_COUNT_CHOICES.contains(&count) => Some(count),
        _ => None,
    }
}

// "1" through max, returned zero-based.
fn parse_choice(line: &str, max: usize) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(choice) if choice >= 1 && choice <= max => Some(choice - 1),
        _ => None,
    }
}

fn parse_yes_no(line: &str, default: bool) -> bool {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
