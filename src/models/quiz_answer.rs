use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::word::PartOfSpeech;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizAnswer {
    pub id: Uuid,
    pub quiz_result_id: Uuid,
    pub word_id: Uuid,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizAnswer {
    pub quiz_result_id: Uuid,
    pub word_id: Uuid,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

/// Stored answer joined with the word it was asked about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AnswerWithWord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub answer: QuizAnswer,
    pub english: String,
    pub korean: String,
    pub part_of_speech: PartOfSpeech,
}
