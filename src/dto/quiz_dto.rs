use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::quiz_question::QuizQuestion;
use crate::models::word::PartOfSpeech;
use crate::services::quiz_session::{AnswerRecord, SessionState};
use crate::services::result_recorder::RecordReport;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(range(min = 1))]
    pub count: Option<usize>,
    #[validate(length(min = 1, max = 100))]
    pub word_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    #[validate(length(min = 1))]
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    General,
    Practice,
}

/// The current prompt, without its answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub word_id: Uuid,
    pub english: String,
    pub part_of_speech: PartOfSpeech,
    pub part_of_speech_label: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for QuestionView {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            word_id: q.word.id,
            english: q.word.english.clone(),
            part_of_speech: q.word.part_of_speech,
            part_of_speech_label: q.word.part_of_speech.korean_label().to_string(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerView {
    pub word_id: Uuid,
    pub english: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl From<&AnswerRecord> for AnswerView {
    fn from(a: &AnswerRecord) -> Self {
        Self {
            word_id: a.word.id,
            english: a.word.english.clone(),
            user_answer: a.user_answer.clone(),
            correct_answer: a.correct_answer.clone(),
            is_correct: a.is_correct,
            answered_at: a.answered_at,
        }
    }
}

/// How the finished session was persisted. `result_id` is absent while the
/// result is still being written, when the result row could not be written,
/// or when the session had no questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingView {
    pub in_progress: bool,
    pub recorded: bool,
    pub result_id: Option<Uuid>,
    pub answers_saved: bool,
    pub stats_updated: usize,
    pub stats_failed: usize,
}

impl From<RecordReport> for RecordingView {
    fn from(r: RecordReport) -> Self {
        Self {
            in_progress: false,
            recorded: true,
            result_id: Some(r.result_id),
            answers_saved: r.answers_saved,
            stats_updated: r.stats_updated,
            stats_failed: r.stats_failed,
        }
    }
}

impl RecordingView {
    pub fn in_progress() -> Self {
        Self {
            in_progress: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryView {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: i32,
    pub answers: Vec<AnswerView>,
    pub recording: RecordingView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub mode: QuizMode,
    pub status: String,
    pub question_index: Option<usize>,
    pub total_questions: usize,
    pub score: usize,
    pub pending_answer: Option<String>,
    pub question: Option<QuestionView>,
    pub summary: Option<SummaryView>,
    pub started_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn status_of(state: SessionState) -> (&'static str, Option<usize>) {
        match state {
            SessionState::AnsweringQuestion { index } => ("answering", Some(index)),
            SessionState::Completed => ("completed", None),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LimitQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}
