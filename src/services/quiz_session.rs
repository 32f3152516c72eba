use chrono::{DateTime, Utc};

use crate::models::quiz_question::QuizQuestion;
use crate::models::quiz_result::percentage;
use crate::models::word::Word;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("quiz session is already completed")]
    AlreadyCompleted,
    #[error("no answer has been selected for the current question")]
    NoAnswerSelected,
    #[error("'{0}' is not an option of the current question")]
    UnknownOption(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AnsweringQuestion { index: usize },
    Completed,
}

/// What an `advance` call moved the session to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub word: Word,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: i32,
    pub answers: Vec<AnswerRecord>,
}

/// Sequential walk over a fixed question list. Answers can be changed until
/// the session advances; there is no way back.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    state: SessionState,
    score: usize,
    pending_answer: Option<String>,
    history: Vec<AnswerRecord>,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let state = if questions.is_empty() {
            SessionState::Completed
        } else {
            SessionState::AnsweringQuestion { index: 0 }
        };
        Self {
            questions,
            state,
            score: 0,
            pending_answer: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    pub fn pending_answer(&self) -> Option<&str> {
        self.pending_answer.as_deref()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            SessionState::AnsweringQuestion { index } => self.questions.get(index),
            SessionState::Completed => None,
        }
    }

    pub fn select_answer(&mut self, answer: impl Into<String>) -> Result<(), SessionError> {
        let answer = answer.into();
        let question = self.current_question().ok_or(SessionError::AlreadyCompleted)?;
        if !question.has_option(&answer) {
            return Err(SessionError::UnknownOption(answer));
        }
        self.pending_answer = Some(answer);
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let index = match self.state {
            SessionState::AnsweringQuestion { index } => index,
            SessionState::Completed => return Err(SessionError::AlreadyCompleted),
        };
        let user_answer = self
            .pending_answer
            .take()
            .ok_or(SessionError::NoAnswerSelected)?;

        let question = &self.questions[index];
        let is_correct = question.is_correct(&user_answer);
        if is_correct {
            self.score += 1;
        }
        self.history.push(AnswerRecord {
            word: question.word.clone(),
            user_answer,
            correct_answer: question.correct_answer.clone(),
            is_correct,
            answered_at: Utc::now(),
        });

        let next = index + 1;
        if next == self.questions.len() {
            self.state = SessionState::Completed;
            Ok(Advance::Completed)
        } else {
            self.state = SessionState::AnsweringQuestion { index: next };
            Ok(Advance::Next { index: next })
        }
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.is_completed() {
            return None;
        }
        Some(SessionSummary {
            score: self.score,
            total_questions: self.questions.len(),
            percentage: percentage(self.score, self.questions.len()),
            answers: self.history.clone(),
        })
    }
}
