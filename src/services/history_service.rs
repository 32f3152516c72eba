use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::database::repository::ResultStore;
use crate::error::{Error, Result};
use crate::models::quiz_answer::AnswerWithWord;
use crate::models::quiz_result::QuizResult;

pub const MAX_RESULTS_PAGE: i64 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ResultDetail {
    pub result: QuizResult,
    pub percentage: i32,
    pub wrong: Vec<AnswerWithWord>,
    pub correct: Vec<AnswerWithWord>,
}

#[derive(Clone)]
pub struct HistoryService {
    results: Arc<dyn ResultStore>,
    default_limit: i64,
}

impl HistoryService {
    pub fn new(results: Arc<dyn ResultStore>, default_limit: i64) -> Self {
        Self {
            results,
            default_limit,
        }
    }

    /// Latest results first. Empty on failure.
    pub async fn recent(&self, limit: Option<i64>) -> Vec<QuizResult> {
        let limit = limit.unwrap_or(self.default_limit).clamp(1, MAX_RESULTS_PAGE);
        match self.results.recent_results(limit).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = ?e, "Error loading results");
                Vec::new()
            }
        }
    }

    pub async fn detail(&self, id: Uuid) -> Result<ResultDetail> {
        let result = self
            .results
            .find_result(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Quiz result {} not found", id)))?;

        let (correct, wrong): (Vec<_>, Vec<_>) = self
            .results
            .answers_for_result(id)
            .await?
            .into_iter()
            .partition(|a| a.answer.is_correct);

        Ok(ResultDetail {
            percentage: result.percentage(),
            result,
            wrong,
            correct,
        })
    }
}
