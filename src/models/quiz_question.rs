use serde::Serialize;

use crate::models::word::Word;

/// One multiple-choice prompt. Lives only inside a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub word: Word,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }
}
