#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use vocab_quiz_backend::config::QuizSettings;
use vocab_quiz_backend::database::repository::{ResultStore, StatsStore, WordRepository};
use vocab_quiz_backend::error::Result;
use vocab_quiz_backend::models::quiz_answer::{AnswerWithWord, NewQuizAnswer, QuizAnswer};
use vocab_quiz_backend::models::quiz_result::{NewQuizResult, QuizResult};
use vocab_quiz_backend::models::word::{PartOfSpeech, Word, WordFilter};
use vocab_quiz_backend::models::word_stats::{WeakWord, WordStats};
use vocab_quiz_backend::{routes, AppState};

pub const VOCABULARY: [(&str, &str, PartOfSpeech); 12] = [
    ("apple", "사과", PartOfSpeech::Noun),
    ("river", "강", PartOfSpeech::Noun),
    ("run", "달리다", PartOfSpeech::Verb),
    ("eat", "먹다", PartOfSpeech::Verb),
    ("happy", "행복한", PartOfSpeech::Adjective),
    ("quiet", "조용한", PartOfSpeech::Adjective),
    ("quickly", "빨리", PartOfSpeech::Adverb),
    ("under", "아래에", PartOfSpeech::Preposition),
    ("and", "그리고", PartOfSpeech::Conjunction),
    ("she", "그녀", PartOfSpeech::Pronoun),
    ("wow", "와", PartOfSpeech::Interjection),
    ("book", "책", PartOfSpeech::Noun),
];

fn rate(correct: i32, total: i32) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    correct as f64 * 100.0 / total as f64
}

pub fn first_attempt(word_id: Uuid, is_correct: bool, at: DateTime<Utc>) -> WordStats {
    let correct = i32::from(is_correct);
    WordStats {
        id: Uuid::new_v4(),
        word_id,
        total_attempts: 1,
        correct_attempts: correct,
        accuracy_rate: rate(correct, 1),
        last_updated: at,
    }
}

pub fn count_attempt(stats: &mut WordStats, is_correct: bool, at: DateTime<Utc>) {
    stats.total_attempts += 1;
    stats.correct_attempts += i32::from(is_correct);
    stats.accuracy_rate = rate(stats.correct_attempts, stats.total_attempts);
    stats.last_updated = at;
}

/// Process-local stand-in for the Postgres tables.
#[derive(Default)]
pub struct MemoryStore {
    pub words: Mutex<Vec<Word>>,
    pub results: Mutex<Vec<QuizResult>>,
    pub answers: Mutex<Vec<QuizAnswer>>,
    pub stats: Mutex<HashMap<Uuid, WordStats>>,
}

impl MemoryStore {
    pub fn seeded() -> Arc<Self> {
        let store = Self::default();
        {
            let mut words = store.words.lock().unwrap();
            for (english, korean, pos) in VOCABULARY {
                words.push(Word {
                    id: Uuid::new_v4(),
                    english: english.to_string(),
                    korean: korean.to_string(),
                    part_of_speech: pos,
                    difficulty: None,
                    is_active: true,
                    created_at: Some(Utc::now()),
                });
            }
        }
        Arc::new(store)
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn word(&self, id: Uuid) -> Word {
        self.words
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .expect("word exists")
    }

    pub fn word_by_english(&self, english: &str) -> Word {
        self.words
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.english == english)
            .cloned()
            .expect("word exists")
    }

    pub fn set_stats(&self, word_id: Uuid, total: i32, correct: i32) {
        let mut stats = first_attempt(word_id, correct > 0, Utc::now());
        for i in 1..total {
            count_attempt(&mut stats, i < correct, Utc::now());
        }
        self.stats.lock().unwrap().insert(word_id, stats);
    }
}

#[async_trait]
impl WordRepository for MemoryStore {
    async fn fetch_words(&self, filter: &WordFilter) -> Result<Vec<Word>> {
        let mut matched: Vec<Word> = self
            .words
            .lock()
            .unwrap()
            .iter()
            .filter(|w| filter.matches(w))
            .cloned()
            .collect();
        if filter.random_order {
            matched.shuffle(&mut rand::thread_rng());
        }
        if let Some(limit) = filter.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn insert_result(&self, result: NewQuizResult) -> Result<QuizResult> {
        let row = QuizResult {
            id: Uuid::new_v4(),
            score: result.score,
            total_questions: result.total_questions,
            completed_at: result.completed_at,
        };
        self.results.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn insert_answers(&self, answers: Vec<NewQuizAnswer>) -> Result<u64> {
        let mut stored = self.answers.lock().unwrap();
        let count = answers.len() as u64;
        for a in answers {
            stored.push(QuizAnswer {
                id: Uuid::new_v4(),
                quiz_result_id: a.quiz_result_id,
                word_id: a.word_id,
                user_answer: a.user_answer,
                correct_answer: a.correct_answer,
                is_correct: a.is_correct,
                answered_at: a.answered_at,
            });
        }
        Ok(count)
    }

    async fn recent_results(&self, limit: i64) -> Result<Vec<QuizResult>> {
        let mut rows = self.results.lock().unwrap().clone();
        rows.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn find_result(&self, id: Uuid) -> Result<Option<QuizResult>> {
        Ok(self.results.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn answers_for_result(&self, result_id: Uuid) -> Result<Vec<AnswerWithWord>> {
        let answers: Vec<QuizAnswer> = self
            .answers
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.quiz_result_id == result_id)
            .cloned()
            .collect();
        Ok(answers
            .into_iter()
            .map(|answer| {
                let word = self.word(answer.word_id);
                AnswerWithWord {
                    answer,
                    english: word.english,
                    korean: word.korean,
                    part_of_speech: word.part_of_speech,
                }
            })
            .collect())
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn find_by_word(&self, word_id: Uuid) -> Result<Option<WordStats>> {
        Ok(self.stats.lock().unwrap().get(&word_id).cloned())
    }

    async fn record_attempt(&self, word_id: Uuid, is_correct: bool) -> Result<WordStats> {
        let mut stats = self.stats.lock().unwrap();
        let now = Utc::now();
        let row = stats
            .entry(word_id)
            .and_modify(|s| count_attempt(s, is_correct, now))
            .or_insert_with(|| first_attempt(word_id, is_correct, now));
        Ok(row.clone())
    }

    async fn weakest(&self, min_attempts: i32, limit: i64) -> Result<Vec<WeakWord>> {
        let mut eligible: Vec<WordStats> = self
            .stats
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.total_attempts >= min_attempts)
            .cloned()
            .collect();
        eligible.sort_by(|a, b| {
            a.accuracy_rate
                .total_cmp(&b.accuracy_rate)
                .then_with(|| b.total_attempts.cmp(&a.total_attempts))
        });
        eligible.truncate(limit as usize);
        Ok(eligible
            .into_iter()
            .map(|stats| {
                let word = self.word(stats.word_id);
                WeakWord {
                    stats,
                    english: word.english,
                    korean: word.korean,
                    part_of_speech: word.part_of_speech,
                }
            })
            .collect())
    }
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    let state = AppState::from_stores(store.clone(), store.clone(), store, QuizSettings::default());
    routes::router(state, 1000)
}

pub async fn call(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}
