use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::word::PartOfSpeech;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WordStats {
    pub id: Uuid,
    pub word_id: Uuid,
    pub total_attempts: i32,
    pub correct_attempts: i32,
    pub accuracy_rate: f64,
    pub last_updated: DateTime<Utc>,
}

/// In-process mirror of the `word_stats` upsert, used by unit tests to
/// fabricate store responses.
#[cfg(test)]
impl WordStats {
    /// Row for the very first attempt at a word.
    pub fn first_attempt(word_id: Uuid, is_correct: bool, at: DateTime<Utc>) -> Self {
        let correct = i32::from(is_correct);
        Self {
            id: Uuid::new_v4(),
            word_id,
            total_attempts: 1,
            correct_attempts: correct,
            accuracy_rate: accuracy_rate(correct, 1),
            last_updated: at,
        }
    }

    /// Counts one more attempt and recomputes the rate from the counters.
    pub fn record_attempt(&mut self, is_correct: bool, at: DateTime<Utc>) {
        self.total_attempts += 1;
        self.correct_attempts += i32::from(is_correct);
        self.accuracy_rate = accuracy_rate(self.correct_attempts, self.total_attempts);
        self.last_updated = at;
    }
}

/// 100 × correct / total, or 0 before any attempt.
#[cfg(test)]
pub fn accuracy_rate(correct: i32, total: i32) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    correct as f64 * 100.0 / total as f64
}

/// Stats row joined with the word text, as listed on the weak-words screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeakWord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub stats: WordStats,
    pub english: String,
    pub korean: String,
    pub part_of_speech: PartOfSpeech,
}
