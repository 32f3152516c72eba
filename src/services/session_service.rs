use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::config::QuizSettings;
use crate::dto::quiz_dto::{
    AnswerView, QuestionView, QuizMode, RecordingView, SessionResponse, SummaryView,
};
use crate::error::{Error, Result};
use crate::models::quiz_question::QuizQuestion;
use crate::services::question_builder::QuestionSetBuilder;
use crate::services::quiz_session::{Advance, QuizSession};
use crate::services::result_recorder::ResultRecorder;

struct SessionEntry {
    session: QuizSession,
    mode: QuizMode,
    started_at: DateTime<Utc>,
    recording: RecordingView,
}

impl SessionEntry {
    fn to_response(&self, session_id: Uuid) -> SessionResponse {
        let (status, question_index) = SessionResponse::status_of(self.session.state());
        let summary = self.session.summary().map(|s| SummaryView {
            score: s.score,
            total_questions: s.total_questions,
            percentage: s.percentage,
            answers: s.answers.iter().map(AnswerView::from).collect(),
            recording: self.recording.clone(),
        });
        SessionResponse {
            session_id,
            mode: self.mode,
            status: status.to_string(),
            question_index,
            total_questions: self.session.total_questions(),
            score: self.session.score(),
            pending_answer: self.session.pending_answer().map(str::to_string),
            question: self.session.current_question().map(QuestionView::from),
            summary,
            started_at: self.started_at,
        }
    }
}

/// Registry of live quiz sessions. Sessions are kept in memory only and are
/// dropped by `prune_expired`.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    builder: QuestionSetBuilder,
    recorder: ResultRecorder,
    settings: QuizSettings,
}

impl SessionService {
    pub fn new(builder: QuestionSetBuilder, recorder: ResultRecorder, settings: QuizSettings) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            builder,
            recorder,
            settings,
        }
    }

    pub async fn start_general(&self, count: Option<usize>) -> Result<SessionResponse> {
        let count = count.unwrap_or(self.settings.default_question_count);
        if count == 0 || count > self.settings.max_question_count {
            return Err(Error::BadRequest(format!(
                "count must be between 1 and {}",
                self.settings.max_question_count
            )));
        }
        let words = self.builder.sample_words(count).await;
        let mut rng = StdRng::from_entropy();
        let questions = self.builder.build(count, words, &mut rng).await;
        Ok(self.register(questions, QuizMode::General))
    }

    pub async fn start_practice(&self, word_ids: Vec<Uuid>) -> Result<SessionResponse> {
        let count = word_ids.len();
        let words = self.builder.words_by_ids(word_ids).await;
        let mut rng = StdRng::from_entropy();
        let questions = self.builder.build(count, words, &mut rng).await;
        Ok(self.register(questions, QuizMode::Practice))
    }

    pub fn get(&self, session_id: Uuid) -> Result<SessionResponse> {
        let sessions = self.sessions.lock().expect("session registry mutex poisoned");
        let entry = sessions.get(&session_id).ok_or_else(|| not_found(session_id))?;
        Ok(entry.to_response(session_id))
    }

    pub fn select_answer(&self, session_id: Uuid, answer: String) -> Result<SessionResponse> {
        let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
        let entry = sessions.get_mut(&session_id).ok_or_else(|| not_found(session_id))?;
        entry.session.select_answer(answer)?;
        Ok(entry.to_response(session_id))
    }

    /// Moves to the next question. The call that completes the session also
    /// records it; any later call sees `AlreadyCompleted`. While the result
    /// is being written the session reads as completed with
    /// `recording.in_progress` set.
    pub async fn advance(&self, session_id: Uuid) -> Result<SessionResponse> {
        let (finished, mut response) = {
            let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
            let entry = sessions.get_mut(&session_id).ok_or_else(|| not_found(session_id))?;
            match entry.session.advance()? {
                Advance::Next { .. } => return Ok(entry.to_response(session_id)),
                Advance::Completed => {
                    entry.recording = RecordingView::in_progress();
                    (entry.session.summary(), entry.to_response(session_id))
                }
            }
        };

        let recording = match finished {
            Some(summary) => match self.recorder.record(summary.score, &summary.answers).await {
                Ok(report) => RecordingView::from(report),
                Err(e) => {
                    tracing::error!(session_id = %session_id, error = ?e, "Quiz result was not recorded");
                    RecordingView::default()
                }
            },
            None => RecordingView::default(),
        };

        if let Some(summary) = response.summary.as_mut() {
            summary.recording = recording.clone();
        }
        let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
        match sessions.get_mut(&session_id) {
            Some(entry) => entry.recording = recording,
            None => tracing::warn!(session_id = %session_id, "session expired while its result was recorded"),
        }
        Ok(response)
    }

    /// Drops sessions started more than `ttl` ago. Returns how many went.
    pub fn prune_expired(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
        let before = sessions.len();
        sessions.retain(|_, entry| entry.started_at > cutoff);
        before - sessions.len()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().expect("session registry mutex poisoned").len()
    }

    fn register(&self, questions: Vec<QuizQuestion>, mode: QuizMode) -> SessionResponse {
        let session_id = Uuid::new_v4();
        let entry = SessionEntry {
            session: QuizSession::new(questions),
            mode,
            started_at: Utc::now(),
            recording: RecordingView::default(),
        };
        let response = entry.to_response(session_id);
        tracing::info!(
            session_id = %session_id,
            mode = ?mode,
            questions = entry.session.total_questions(),
            "quiz session started"
        );
        self.sessions
            .lock()
            .expect("session registry mutex poisoned")
            .insert(session_id, entry);
        response
    }
}

fn not_found(session_id: Uuid) -> Error {
    Error::NotFound(format!("Quiz session {} not found", session_id))
}
