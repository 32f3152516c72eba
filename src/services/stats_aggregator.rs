use std::sync::Arc;

use uuid::Uuid;

use crate::database::repository::StatsStore;
use crate::error::Result;
use crate::models::word_stats::WordStats;
use crate::services::quiz_session::AnswerRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsOutcome {
    pub updated: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct StatsAggregator {
    stats: Arc<dyn StatsStore>,
}

impl StatsAggregator {
    pub fn new(stats: Arc<dyn StatsStore>) -> Self {
        Self { stats }
    }

    pub async fn update(&self, word_id: Uuid, is_correct: bool) -> Result<WordStats> {
        let stats = self.stats.record_attempt(word_id, is_correct).await?;
        tracing::debug!(
            word_id = %word_id,
            total = stats.total_attempts,
            correct = stats.correct_attempts,
            accuracy = stats.accuracy_rate,
            "word stats updated"
        );
        Ok(stats)
    }

    /// Applies answers one at a time in session order. A failing word is
    /// logged and skipped.
    pub async fn apply(&self, answers: &[AnswerRecord]) -> StatsOutcome {
        let mut outcome = StatsOutcome::default();
        for answer in answers {
            match self.update(answer.word.id, answer.is_correct).await {
                Ok(_) => outcome.updated += 1,
                Err(e) => {
                    tracing::error!(word_id = %answer.word.id, error = ?e, "Error updating word stats");
                    outcome.failed += 1;
                }
            }
        }
        outcome
    }

    pub async fn lookup(&self, word_id: Uuid) -> Result<Option<WordStats>> {
        self.stats.find_by_word(word_id).await
    }
}
