use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizResult {
    pub id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn percentage(&self) -> i32 {
        percentage(self.score as usize, self.total_questions as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizResult {
    pub score: i32,
    pub total_questions: i32,
    pub completed_at: DateTime<Utc>,
}

/// Rounded share of correct answers; 0 when nothing was asked.
pub fn percentage(score: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    (score as f64 * 100.0 / total as f64).round() as i32
}
