use std::fmt;

use rand::Rng;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, Quiz, UserAnswer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Setup,
    Loading,
    Playing,
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            SessionPhase::Setup => "setup",
            SessionPhase::Loading => "loading",
            SessionPhase::Playing => "playing",
            SessionPhase::Finished => "finished",
        };
        write!(f, "{}", phase)
    }
}

/// What became of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded { is_correct: bool, finished: bool },
    Ignored,
}

/// The single quiz run this process hosts.
///
/// Phases move setup -> loading -> playing -> finished; a finished run
/// goes back to setup only through [`QuizSession::restart`]. Loads are
/// tagged with a one-shot token so a response arriving after a restart
/// cannot resurrect an abandoned run.
#[derive(Debug, Default)]
pub struct QuizSession {
    phase: SessionPhase,
    quiz: Quiz,
    answers: Vec<UserAnswer>,
    current_index: usize,
    score: usize,
    pending_token: Option<Uuid>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.len()
    }

    /// The question awaiting an answer, with its zero-based position.
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        self.quiz
            .question(self.current_index)
            .map(|question| (self.current_index, question))
    }

    /// Starts a load and hands back the token that the eventual response
    /// must present. Only a session in setup can start loading.
    pub fn begin_loading(&mut self) -> AppResult<Uuid> {
        if self.phase != SessionPhase::Setup {
            return Err(AppError::InvalidTransition(format!(
                "Cannot start loading a quiz while {}",
                self.phase
            )));
        }

        self.clear_run();
        let token = Uuid::new_v4();
        self.pending_token = Some(token);
        self.phase = SessionPhase::Loading;
        Ok(token)
    }

    /// Installs a generated quiz and moves to playing. Returns false when
    /// the token no longer matches the active load (the response is stale
    /// and must be dropped) or the quiz has no questions.
    pub fn apply_quiz<R: Rng + ?Sized>(&mut self, token: Uuid, quiz: Quiz, rng: &mut R) -> bool {
        if !self.take_pending(token) {
            return false;
        }
        if quiz.is_empty() {
            log::warn!("Refusing to start a quiz with no questions");
            self.phase = SessionPhase::Setup;
            return false;
        }

        let mut quiz = quiz;
        quiz.shuffle_questions(rng);
        self.quiz = quiz;
        self.current_index = 0;
        self.phase = SessionPhase::Playing;
        true
    }

    /// Abandons the active load and returns to setup. Returns false when
    /// the token is stale, in which case nothing changes.
    pub fn fail_loading(&mut self, token: Uuid) -> bool {
        if !self.take_pending(token) {
            return false;
        }
        self.phase = SessionPhase::Setup;
        true
    }

    /// Records the answer for the question at `index`.
    ///
    /// A repeated or out-of-order index is ignored rather than rejected, so
    /// a double-fired submission cannot double-count. Submitting when no
    /// quiz is being played is a caller bug and comes back as an error,
    /// except after the run finished, where late submissions are dropped
    /// quietly.
    pub fn submit_answer(&mut self, index: usize, answer: &str) -> AppResult<SubmitOutcome> {
        match self.phase {
            SessionPhase::Finished => return Ok(SubmitOutcome::Ignored),
            SessionPhase::Setup | SessionPhase::Loading => {
                return Err(AppError::InvalidTransition(format!(
                    "Cannot submit an answer while {}",
                    self.phase
                )));
            }
            SessionPhase::Playing => {}
        }
        if index != self.current_index {
            return Ok(SubmitOutcome::Ignored);
        }

        let question = match self.quiz.question(index) {
            Some(question) => question,
            None => return Ok(SubmitOutcome::Ignored),
        };
        let recorded = UserAnswer::record(question, answer);
        let is_correct = recorded.is_correct;
        if is_correct {
            self.score += 1;
        }
        self.answers.push(recorded);

        let finished = self.current_index + 1 >= self.quiz.len();
        if finished {
            self.phase = SessionPhase::Finished;
        } else {
            self.current_index += 1;
        }
        Ok(SubmitOutcome::Recorded {
            is_correct,
            finished,
        })
    }

    /// Drops the current run, whatever phase it is in, and returns to
    /// setup. Any load still in flight is orphaned by clearing its token.
    pub fn restart(&mut self) {
        self.clear_run();
        self.pending_token = None;
        self.phase = SessionPhase::Setup;
    }

    // Consumes the pending token if it matches; a mismatch leaves the
    // session untouched.
    fn take_pending(&mut self, token: Uuid) -> bool {
        if self.phase != SessionPhase::Loading || self.pending_token != Some(token) {
            return false;
        }
        self.pending_token = None;
        true
    }

    fn clear_run(&mut self) {
        self.quiz = Quiz::default();
        self.answers.clear();
        self.current_index = 0;
        self.score = 0;
    }
}
