//! Storage collaborators used by the quiz services.
//!
//! `PgStore` implements all three against Postgres; tests substitute mocks
//! or in-memory stores.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::quiz_answer::{AnswerWithWord, NewQuizAnswer};
use crate::models::quiz_result::{NewQuizResult, QuizResult};
use crate::models::word::{Word, WordFilter};
use crate::models::word_stats::{WeakWord, WordStats};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WordRepository: Send + Sync {
    async fn fetch_words(&self, filter: &WordFilter) -> Result<Vec<Word>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert_result(&self, result: NewQuizResult) -> Result<QuizResult>;

    async fn insert_answers(&self, answers: Vec<NewQuizAnswer>) -> Result<u64>;

    async fn recent_results(&self, limit: i64) -> Result<Vec<QuizResult>>;

    async fn find_result(&self, id: Uuid) -> Result<Option<QuizResult>>;

    /// Answers of one result ordered by `answered_at`.
    async fn answers_for_result(&self, result_id: Uuid) -> Result<Vec<AnswerWithWord>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn find_by_word(&self, word_id: Uuid) -> Result<Option<WordStats>>;

    /// Counts one attempt for `word_id` in a single atomic step, creating the
    /// row on first attempt. Returns the row as stored afterwards.
    async fn record_attempt(&self, word_id: Uuid, is_correct: bool) -> Result<WordStats>;

    /// Words with at least `min_attempts`, lowest accuracy first, more
    /// attempts first among equal rates.
    async fn weakest(&self, min_attempts: i32, limit: i64) -> Result<Vec<WeakWord>>;
}
