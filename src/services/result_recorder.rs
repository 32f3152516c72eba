use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::database::repository::ResultStore;
use crate::error::{Error, Result};
use crate::models::quiz_answer::NewQuizAnswer;
use crate::models::quiz_result::NewQuizResult;
use crate::services::quiz_session::AnswerRecord;
use crate::services::stats_aggregator::StatsAggregator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub result_id: Uuid,
    pub answers_saved: bool,
    pub stats_updated: usize,
    pub stats_failed: usize,
}

/// Persists a finished session: the result row, then its answers, then the
/// per-word statistics. The steps are not transactional; a failure after the
/// result row leaves what was already written.
#[derive(Clone)]
pub struct ResultRecorder {
    results: Arc<dyn ResultStore>,
    aggregator: StatsAggregator,
}

impl ResultRecorder {
    pub fn new(results: Arc<dyn ResultStore>, aggregator: StatsAggregator) -> Self {
        Self {
            results,
            aggregator,
        }
    }

    /// Fails only when the result row itself could not be written.
    pub async fn record(&self, score: usize, answers: &[AnswerRecord]) -> Result<RecordReport> {
        if answers.is_empty() {
            return Err(Error::BadRequest("Cannot record a quiz without answers".to_string()));
        }

        let result = self
            .results
            .insert_result(NewQuizResult {
                score: score as i32,
                total_questions: answers.len() as i32,
                completed_at: Utc::now(),
            })
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Error saving quiz result");
                e
            })?;

        let rows = answers
            .iter()
            .map(|a| NewQuizAnswer {
                quiz_result_id: result.id,
                word_id: a.word.id,
                user_answer: a.user_answer.clone(),
                correct_answer: a.correct_answer.clone(),
                is_correct: a.is_correct,
                answered_at: a.answered_at,
            })
            .collect();

        let mut report = RecordReport {
            result_id: result.id,
            answers_saved: false,
            stats_updated: 0,
            stats_failed: 0,
        };

        if let Err(e) = self.results.insert_answers(rows).await {
            tracing::error!(result_id = %result.id, error = ?e, "Error saving quiz answers");
            return Ok(report);
        }
        report.answers_saved = true;

        let stats = self.aggregator.apply(answers).await;
        report.stats_updated = stats.updated;
        report.stats_failed = stats.failed;

        tracing::info!(
            result_id = %result.id,
            score = score,
            total = answers.len(),
            stats_failed = stats.failed,
            "quiz result recorded"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::{MockResultStore, MockStatsStore};
    use crate::models::quiz_result::QuizResult;
    use crate::models::word::{PartOfSpeech, Word};
    use crate::models::word_stats::WordStats;

    fn answer(korean: &str, user_answer: &str) -> AnswerRecord {
        AnswerRecord {
            word: Word {
                id: Uuid::new_v4(),
                english: "word".to_string(),
                korean: korean.to_string(),
                part_of_speech: PartOfSpeech::Verb,
                difficulty: None,
                is_active: true,
                created_at: None,
            },
            user_answer: user_answer.to_string(),
            correct_answer: korean.to_string(),
            is_correct: korean == user_answer,
            answered_at: Utc::now(),
        }
    }

    fn stored(result: NewQuizResult) -> QuizResult {
        QuizResult {
            id: Uuid::new_v4(),
            score: result.score,
            total_questions: result.total_questions,
            completed_at: result.completed_at,
        }
    }

    fn counting_stats(expected_calls: usize) -> StatsAggregator {
        let mut stats = MockStatsStore::new();
        stats
            .expect_record_attempt()
            .times(expected_calls)
            .returning(|word_id, ok| Ok(WordStats::first_attempt(word_id, ok, Utc::now())));
        StatsAggregator::new(Arc::new(stats))
    }

    #[tokio::test]
    async fn records_result_answers_and_stats() {
        let answers = vec![answer("가다", "가다"), answer("오다", "먹다"), answer("보다", "보다")];
        let mut results = MockResultStore::new();
        results
            .expect_insert_result()
            .withf(|r| r.score == 2 && r.total_questions == 3)
            .times(1)
            .returning(|r| Ok(stored(r)));
        results
            .expect_insert_answers()
            .withf(|rows| {
                rows.len() == 3
                    && rows.iter().map(|r| r.is_correct).collect::<Vec<_>>() == vec![true, false, true]
                    && rows.windows(2).all(|w| w[0].quiz_result_id == w[1].quiz_result_id)
            })
            .times(1)
            .returning(|rows| Ok(rows.len() as u64));
        let recorder = ResultRecorder::new(Arc::new(results), counting_stats(3));

        let report = recorder.record(2, &answers).await.unwrap();

        assert!(report.answers_saved);
        assert_eq!((report.stats_updated, report.stats_failed), (3, 0));
    }

    #[tokio::test]
    async fn nothing_is_written_when_result_insert_fails() {
        let mut results = MockResultStore::new();
        results
            .expect_insert_result()
            .returning(|_| Err(Error::Internal("connection reset".to_string())));
        results.expect_insert_answers().never();
        let recorder = ResultRecorder::new(Arc::new(results), counting_stats(0));

        let outcome = recorder.record(1, &[answer("가다", "가다")]).await;

        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn answer_failure_keeps_result_and_skips_stats() {
        let mut results = MockResultStore::new();
        results.expect_insert_result().returning(|r| Ok(stored(r)));
        results
            .expect_insert_answers()
            .returning(|_| Err(Error::Internal("foreign key violation".to_string())));
        let recorder = ResultRecorder::new(Arc::new(results), counting_stats(0));

        let report = recorder.record(0, &[answer("가다", "오다")]).await.unwrap();

        assert!(!report.answers_saved);
        assert_eq!(report.stats_updated, 0);
    }

    #[tokio::test]
    async fn empty_sessions_are_not_recorded() {
        let mut results = MockResultStore::new();
        results.expect_insert_result().never();
        let recorder = ResultRecorder::new(Arc::new(results), counting_stats(0));

        assert!(matches!(recorder.record(0, &[]).await, Err(Error::BadRequest(_))));
    }
}
