use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "part_of_speech", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Pronoun,
    Interjection,
}

impl PartOfSpeech {
    /// Label shown next to the English prompt.
    pub fn korean_label(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "명사",
            PartOfSpeech::Verb => "동사",
            PartOfSpeech::Adjective => "형용사",
            PartOfSpeech::Adverb => "부사",
            PartOfSpeech::Preposition => "전치사",
            PartOfSpeech::Conjunction => "접속사",
            PartOfSpeech::Pronoun => "대명사",
            PartOfSpeech::Interjection => "감탄사",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: Uuid,
    pub english: String,
    pub korean: String,
    pub part_of_speech: PartOfSpeech,
    pub difficulty: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Row filter for word fetches. `include_ids: None` means no id restriction;
/// `limit: None` means no row limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFilter {
    pub active_only: bool,
    pub include_ids: Option<Vec<Uuid>>,
    pub exclude_ids: Vec<Uuid>,
    pub limit: Option<i64>,
    pub random_order: bool,
}

impl WordFilter {
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    pub fn with_ids(mut self, ids: Vec<Uuid>) -> Self {
        self.include_ids = Some(ids);
        self
    }

    pub fn excluding(mut self, ids: Vec<Uuid>) -> Self {
        self.exclude_ids = ids;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn shuffled(mut self) -> Self {
        self.random_order = true;
        self
    }

    pub fn matches(&self, word: &Word) -> bool {
        if self.active_only && !word.is_active {
            return false;
        }
        if let Some(ids) = &self.include_ids {
            if !ids.contains(&word.id) {
                return false;
            }
        }
        !self.exclude_ids.contains(&word.id)
    }
}
