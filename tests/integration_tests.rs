use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::Notify;

use quizify::{
    app_state::AppState,
    config::{Config, DifficultyPolicy},
    crypto::CredentialCipher,
    errors::{AppError, AppResult},
    models::domain::{PromptEntry, Quiz, RevealPolicy},
    models::dto::{GenerateQuizRequest, QuizResponseDto},
    notifications::Notifier,
    repositories::{CredentialRepository, PromptRepository},
    services::{CredentialService, OpenAiQuizGenerator, QuizGenerator},
    session::SessionPhase,
};

// Decodes a raw payload exactly the way the real generator decodes a model
// reply, so malformed payloads fail through the same path.
fn decode_payload(payload: &str) -> AppResult<Quiz> {
    let dto: QuizResponseDto = serde_json::from_str(payload).map_err(|err| {
        AppError::EmptyOrInvalidResponse(format!("Reply is not a quiz payload: {}", err))
    })?;
    Quiz::try_from(dto)
}

/// Serves canned payloads in order, one per generation.
struct ScriptedGenerator {
    payloads: std::sync::Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    fn new<I: IntoIterator<Item = String>>(payloads: I) -> Self {
        Self {
            payloads: std::sync::Mutex::new(payloads.into_iter().collect()),
        }
    }
}

#[async_trait]
impl QuizGenerator for ScriptedGenerator {
    async fn generate_quiz(&self, _request: &GenerateQuizRequest) -> AppResult<Quiz> {
        let payload = self
            .payloads
            .lock()
            .expect("payload lock")
            .pop_front()
            .expect("a scripted payload for every generation");
        decode_payload(&payload)
    }
}

/// Parks in the generator until released, so a test can interleave other
/// session calls with an in-flight load.
struct BlockingGenerator {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    payload: String,
}

#[async_trait]
impl QuizGenerator for BlockingGenerator {
    async fn generate_quiz(&self, _request: &GenerateQuizRequest) -> AppResult<Quiz> {
        self.entered.notify_one();
        self.release.notified().await;
        decode_payload(&self.payload)
    }
}

struct InMemoryCredentialRepository {
    ciphertext: tokio::sync::RwLock<Option<String>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn load(&self) -> AppResult<Option<String>> {
        Ok(self.ciphertext.read().await.clone())
    }

    async fn save(&self, ciphertext: &str) -> AppResult<()> {
        *self.ciphertext.write().await = Some(ciphertext.to_string());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.ciphertext.write().await = None;
        Ok(())
    }
}

struct InMemoryPromptRepository {
    entries: tokio::sync::RwLock<Vec<PromptEntry>>,
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepository {
    async fn list(&self) -> AppResult<Vec<PromptEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn record(&self, prompt: &str) -> AppResult<()> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(());
        }
        let mut entries = self.entries.write().await;
        if !entries.iter().any(|entry| entry.text == prompt) {
            entries.push(PromptEntry::new(prompt));
        }
        Ok(())
    }

    async fn remove(&self, prompt: &str) -> AppResult<()> {
        self.entries.write().await.retain(|entry| entry.text != prompt);
        Ok(())
    }
}

struct RecordingNotifier {
    errors: std::sync::Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            errors: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, _message: &str) {}

    fn error(&self, message: &str) {
        self.errors
            .lock()
            .expect("notifier lock")
            .push(message.to_string());
    }
}

fn make_config() -> Config {
    Config {
        data_dir: PathBuf::from("unused-in-memory"),
        encryption_key: SecretString::from("integration test secret".to_string()),
        api_base: None,
        models: vec!["gpt-4o-mini".to_string()],
        default_difficulty: "hard".to_string(),
        difficulty_policy: DifficultyPolicy::default(),
        reveal_policy: RevealPolicy::OnlyIncorrect,
        sample_mode: false,
    }
}

fn make_credentials() -> Arc<CredentialService> {
    let repository = Arc::new(InMemoryCredentialRepository {
        ciphertext: tokio::sync::RwLock::new(None),
    });
    let cipher = CredentialCipher::new(&SecretString::from(
        "integration test secret".to_string(),
    ));
    Arc::new(CredentialService::new(repository, cipher))
}

fn make_state(generator: Arc<dyn QuizGenerator>) -> (AppState, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppState::with_parts(
        Arc::new(make_config()),
        make_credentials(),
        Arc::new(InMemoryPromptRepository {
            entries: tokio::sync::RwLock::new(Vec::new()),
        }),
        generator,
        notifier.clone(),
    );
    (state, notifier)
}

fn make_request() -> GenerateQuizRequest {
    GenerateQuizRequest::new("the roman empire", 5, "gpt-4o-mini", "hard")
}

fn quiz_payload(count: usize) -> String {
    let questions: Vec<serde_json::Value> = (1..=count)
        .map(|n| {
            serde_json::json!({
                "text": format!("Question {}", n),
                "correctAnswer": format!("Correct {}", n),
                "incorrectAnswers": [
                    format!("Wrong {}a", n),
                    format!("Wrong {}b", n),
                    format!("Wrong {}c", n),
                ],
            })
        })
        .collect();
    serde_json::json!({ "questions": questions }).to_string()
}

#[tokio::test]
async fn full_quiz_run_reaches_a_summary() {
    let (state, notifier) = make_state(Arc::new(ScriptedGenerator::new([quiz_payload(5)])));

    state.start_quiz(make_request()).await.expect("start quiz");
    assert_eq!(state.phase().await, SessionPhase::Playing);
    assert_eq!(state.total_questions().await, 5);

    // Answer the first three correctly and miss the last two.
    let mut answered = 0;
    while let Some((index, question)) = state.current_question().await {
        let answer = if answered < 3 {
            question.correct_answer.clone()
        } else {
            question.incorrect_answers[0].clone()
        };
        state.submit_answer(index, &answer).await.expect("submit");
        answered += 1;
    }

    assert_eq!(state.phase().await, SessionPhase::Finished);
    let summary = state.summary().await.expect("summary");
    assert_eq!(summary.score_line(), "3/5");
    assert_eq!(summary.per_question.len(), 5);

    let reveals = summary
        .per_question
        .iter()
        .filter(|review| review.revealed_answer(RevealPolicy::OnlyIncorrect).is_some())
        .count();
    assert_eq!(reveals, 2);
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn perfect_run_reveals_nothing_under_the_default_policy() {
    let (state, _) = make_state(Arc::new(ScriptedGenerator::new([quiz_payload(10)])));
    let request = GenerateQuizRequest::new("the roman empire", 10, "gpt-4o-mini", "hard");

    state.start_quiz(request).await.expect("start quiz");
    while let Some((index, question)) = state.current_question().await {
        state
            .submit_answer(index, &question.correct_answer)
            .await
            .expect("submit");
    }

    let summary = state.summary().await.expect("summary");
    assert_eq!(summary.score_line(), "10/10");
    assert!(summary
        .per_question
        .iter()
        .all(|review| review.revealed_answer(RevealPolicy::OnlyIncorrect).is_none()));
}

#[tokio::test]
async fn missing_credential_blocks_generation_before_any_request() {
    let config = Arc::new(make_config());
    let credentials = make_credentials();
    let generator = Arc::new(OpenAiQuizGenerator::new(config.clone(), credentials.clone()));
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppState::with_parts(
        config,
        credentials,
        Arc::new(InMemoryPromptRepository {
            entries: tokio::sync::RwLock::new(Vec::new()),
        }),
        generator,
        notifier.clone(),
    );

    let err = state
        .start_quiz(make_request())
        .await
        .expect_err("no credential configured");
    assert!(matches!(err, AppError::CredentialMissing));
    assert!(err.is_credential_failure());
    assert_eq!(state.phase().await, SessionPhase::Setup);

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("credential"));
}

#[tokio::test]
async fn malformed_model_reply_is_rejected_and_the_session_recovers() {
    let truncated = serde_json::json!({
        "questions": [{ "text": "Question 1", "correctAnswer": "Correct 1" }]
    })
    .to_string();
    let (state, notifier) = make_state(Arc::new(ScriptedGenerator::new([
        truncated,
        quiz_payload(5),
    ])));

    let err = state
        .start_quiz(make_request())
        .await
        .expect_err("truncated payload");
    assert!(matches!(err, AppError::EmptyOrInvalidResponse(_)));
    assert_eq!(state.phase().await, SessionPhase::Setup);
    assert_eq!(notifier.errors().len(), 1);

    // The session is back in setup, so the next attempt can succeed.
    state.start_quiz(make_request()).await.expect("second start");
    assert_eq!(state.phase().await, SessionPhase::Playing);
}

#[tokio::test]
async fn restart_during_a_slow_load_discards_the_late_reply() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let (state, notifier) = make_state(Arc::new(BlockingGenerator {
        entered: entered.clone(),
        release: release.clone(),
        payload: quiz_payload(5),
    }));

    let task = tokio::spawn({
        let state = state.clone();
        async move { state.start_quiz(make_request()).await }
    });

    entered.notified().await;
    assert_eq!(state.phase().await, SessionPhase::Loading);
    state.restart().await;
    release.notify_one();

    let result = task.await.expect("join");
    assert!(result.is_ok(), "a superseded reply is dropped, not an error");
    assert_eq!(state.phase().await, SessionPhase::Setup);
    assert_eq!(state.total_questions().await, 0);
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn restart_during_a_slow_load_swallows_the_late_failure() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let (state, notifier) = make_state(Arc::new(BlockingGenerator {
        entered: entered.clone(),
        release: release.clone(),
        payload: "not json at all".to_string(),
    }));

    let task = tokio::spawn({
        let state = state.clone();
        async move { state.start_quiz(make_request()).await }
    });

    entered.notified().await;
    state.restart().await;
    release.notify_one();

    let result = task.await.expect("join");
    assert!(result.is_ok(), "a failure for an abandoned load is dropped");
    assert_eq!(state.phase().await, SessionPhase::Setup);
    assert!(notifier.errors().is_empty());
}
