pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use crate::config::QuizSettings;
use crate::database::postgres::PgStore;
use crate::database::repository::{ResultStore, StatsStore, WordRepository};
use crate::services::{
    history_service::HistoryService, question_builder::QuestionSetBuilder,
    result_recorder::ResultRecorder, session_service::SessionService,
    stats_aggregator::StatsAggregator, weak_words::WeakWordSelector,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionService,
    pub history: HistoryService,
    pub weak_words: WeakWordSelector,
    pub stats: StatsAggregator,
    pub settings: QuizSettings,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let store = Arc::new(PgStore::new(pool));
        Self::from_stores(store.clone(), store.clone(), store, config.quiz.clone())
    }

    pub fn from_stores(
        words: Arc<dyn WordRepository>,
        results: Arc<dyn ResultStore>,
        stats: Arc<dyn StatsStore>,
        settings: QuizSettings,
    ) -> Self {
        let aggregator = StatsAggregator::new(stats.clone());
        let builder = QuestionSetBuilder::new(words, settings.distractor_sample_size);
        let recorder = ResultRecorder::new(results.clone(), aggregator.clone());
        let sessions = SessionService::new(builder, recorder, settings.clone());
        let history = HistoryService::new(results, settings.recent_results_limit);
        let weak_words = WeakWordSelector::new(stats, settings.weak_word_min_attempts);

        Self {
            sessions,
            history,
            weak_words,
            stats: aggregator,
            settings,
        }
    }
}
