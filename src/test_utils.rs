#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Question, Quiz};
    use crate::models::dto::GenerateQuizRequest;

    /// A question whose correct and incorrect answers are derived from its
    /// number, so assertions can predict them.
    pub fn sample_question(number: u32) -> Question {
        Question {
            number,
            text: format!("Sample question {}", number),
            correct_answer: format!("Correct {}", number),
            incorrect_answers: vec![
                format!("Wrong {}a", number),
                format!("Wrong {}b", number),
                format!("Wrong {}c", number),
            ],
        }
    }

    /// A quiz of `count` sample questions numbered 1..=count.
    pub fn sample_quiz(count: u32) -> Quiz {
        Quiz::new((1..=count).map(sample_question).collect())
    }

    /// A request that passes every check against the test configuration.
    pub fn sample_request() -> GenerateQuizRequest {
        GenerateQuizRequest::new("the roman empire", 5, "gpt-4o-mini", "hard")
    }
}

#[cfg(test)]
pub mod doubles {
    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::errors::AppResult;
    use crate::models::domain::PromptEntry;
    use crate::notifications::Notifier;
    use crate::repositories::{CredentialRepository, PromptRepository};

    pub struct InMemoryCredentialRepository {
        ciphertext: RwLock<Option<String>>,
    }

    impl InMemoryCredentialRepository {
        pub fn new() -> Self {
            Self {
                ciphertext: RwLock::new(None),
            }
        }
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

    pub struct InMemoryPromptRepository {
        entries: RwLock<Vec<PromptEntry>>,
    }

    impl InMemoryPromptRepository {
        pub fn new() -> Self {
            Self {
                entries: RwLock::new(Vec::new()),
            }
        }
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
            match entries.iter_mut().find(|entry| entry.text == prompt) {
                Some(entry) => entry.last_used_at = chrono::Utc::now(),
                None => entries.push(PromptEntry::new(prompt)),
            }
            Ok(())
        }

        async fn remove(&self, prompt: &str) -> AppResult<()> {
            self.entries.write().await.retain(|entry| entry.text != prompt);
            Ok(())
        }
    }

    /// Captures notifications so tests can assert on what the user would
    /// have seen.
    pub struct RecordingNotifier {
        infos: std::sync::Mutex<Vec<String>>,
        errors: std::sync::Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self {
                infos: std::sync::Mutex::new(Vec::new()),
                errors: std::sync::Mutex::new(Vec::new()),
            }
        }

        pub fn infos(&self) -> Vec<String> {
            self.infos.lock().expect("notifier lock").clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.errors.lock().expect("notifier lock").clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn info(&self, message: &str) {
            self.infos
                .lock()
                .expect("notifier lock")
                .push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors
                .lock()
                .expect("notifier lock")
                .push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::doubles::*;
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_quiz_shape() {
        let quiz = sample_quiz(3);
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.questions[0].number, 1);
        assert_eq!(quiz.questions[2].correct_answer, "Correct 3");
        assert_eq!(quiz.questions[2].incorrect_answers.len(), 3);
    }

    #[test]
    fn test_fixtures_sample_request_is_well_formed() {
        use validator::Validate;

        let request = sample_request();
        request.validate().expect("fixture request validates");
        assert_eq!(request.question_count, 5);
    }

    #[test]
    fn test_recording_notifier_captures_messages() {
        use crate::notifications::Notifier;

        let notifier = RecordingNotifier::new();
        notifier.info("loaded");
        notifier.error("broke");

        assert_eq!(notifier.infos(), vec!["loaded".to_string()]);
        assert_eq!(notifier.errors(), vec!["broke".to_string()]);
    }
}
