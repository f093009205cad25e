use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    crypto::CredentialCipher,
    errors::{AppError, AppResult},
    models::domain::{PromptEntry, Question, QuizSummary},
    models::dto::GenerateQuizRequest,
    notifications::{Notifier, TerminalNotifier},
    repositories::{FileCredentialRepository, FilePromptRepository, PromptRepository},
    services::{
        CredentialService, OpenAiQuizGenerator, QuizGenerator, ResultsService,
        SampleQuizGenerator,
    },
    session::{QuizSession, SessionPhase, SubmitOutcome},
    storage::LocalStore,
};

/// Everything the host needs, behind `Arc`s so screens can hold it
/// cheaply. The session itself stays private; it is only reachable
/// through the methods below, which enforce its phase rules.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<CredentialService>,
    pub prompts: Arc<dyn PromptRepository>,
    pub notifier: Arc<dyn Notifier>,
    generator: Arc<dyn QuizGenerator>,
    session: Arc<Mutex<QuizSession>>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let config = Arc::new(config);
        let store = Arc::new(LocalStore::open(&config.data_dir)?);

        let cipher = CredentialCipher::new(&config.encryption_key);
        let credentials = Arc::new(CredentialService::new(
            Arc::new(FileCredentialRepository::new(store.clone())),
            cipher,
        ));
        let prompts: Arc<dyn PromptRepository> = Arc::new(FilePromptRepository::new(store));

        let generator: Arc<dyn QuizGenerator> = if config.sample_mode {
            log::warn!("Sample mode is on; quizzes come from the built-in sample set");
            Arc::new(SampleQuizGenerator)
        } else {
            Arc::new(OpenAiQuizGenerator::new(config.clone(), credentials.clone()))
        };

        Ok(Self::with_parts(
            config,
            credentials,
            prompts,
            generator,
            Arc::new(TerminalNotifier),
        ))
    }

    pub fn with_parts(
        config: Arc<Config>,
        credentials: Arc<CredentialService>,
        prompts: Arc<dyn PromptRepository>,
        generator: Arc<dyn QuizGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            credentials,
            prompts,
            notifier,
            generator,
            session: Arc::new(Mutex::new(QuizSession::new())),
        }
    }

    /// Runs one load end to end: marks the session loading, records the
    /// prompt, calls the generator and applies the result.
    ///
    /// The session lock is never held across the generator call, so the
    /// user can restart while a slow response is still in flight; the
    /// load token then makes the late response (or failure) a no-op.
    pub async fn start_quiz(&self, request: GenerateQuizRequest) -> AppResult<()> {
        let token = { self.session.lock().await.begin_loading()? };

        // History is best effort and is written before the network call,
        // so a failed generation still leaves the prompt reusable.
        if let Err(err) = self.prompts.record(request.prompt.trim()).await {
            log::warn!("Failed to record prompt history: {}", err);
        }

        match self.generator.generate_quiz(&request).await {
            Ok(quiz) => {
                let mut session = self.session.lock().await;
                if !session.apply_quiz(token, quiz, &mut rand::thread_rng()) {
                    log::info!("Discarding a quiz response that no longer matches the active load");
                }
                Ok(())
            }
            Err(err) => {
                let current = { self.session.lock().await.fail_loading(token) };
                if !current {
                    log::info!("Discarding a failure for a load that was already abandoned");
                    return Ok(());
                }
                log::error!("Quiz generation failed [{}]: {}", err.error_code(), err);
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    pub async fn submit_answer(&self, index: usize, answer: &str) -> AppResult<SubmitOutcome> {
        self.session.lock().await.submit_answer(index, answer)
    }

    pub async fn restart(&self) {
        self.session.lock().await.restart();
    }

    pub async fn phase(&self) -> SessionPhase {
        self.session.lock().await.phase()
    }

    /// The question awaiting an answer, cloned out of the session.
    pub async fn current_question(&self) -> Option<(usize, Question)> {
        self.session
            .lock()
            .await
            .current_question()
            .map(|(index, question)| (index, question.clone()))
    }

    pub async fn total_questions(&self) -> usize {
        self.session.lock().await.total_questions()
    }

    pub async fn summary(&self) -> AppResult<QuizSummary> {
        let session = self.session.lock().await;
        if session.phase() != SessionPhase::Finished {
            return Err(AppError::InvalidTransition(format!(
                "No finished quiz to summarize (phase is {})",
                session.phase()
            )));
        }
        Ok(ResultsService::summarize(session.answers()))
    }

    /// Saved prompts, oldest first. Unreadable history is treated as
    /// empty; it must never keep the user from starting a quiz.
    pub async fn prompt_history(&self) -> Vec<PromptEntry> {
        match self.prompts.list().await {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Prompt history could not be read: {}", err);
                Vec::new()
            }
        }
    }
}
