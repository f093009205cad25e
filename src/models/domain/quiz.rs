use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub number: u32, // 1-based, reassigned after the question-order shuffle
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    /// All four answers in a fresh uniform permutation.
    ///
    /// Callers compute this once per question presentation and hold the
    /// result fixed until the answer is submitted.
    pub fn shuffled_answers<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut answers = Vec::with_capacity(self.incorrect_answers.len() + 1);
        answers.push(self.correct_answer.clone());
        answers.extend(self.incorrect_answers.iter().cloned());
        answers.shuffle(rng);
        answers
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Quiz { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// One-time question-order permutation, renumbering 1..N to match.
    /// Repeated plays of the same generated quiz do not present questions
    /// in the same order.
    pub fn shuffle_questions<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
        for (position, question) in self.questions.iter_mut().enumerate() {
            question.number = (position + 1) as u32;
        }
    }
}
