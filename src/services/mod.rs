pub mod history_service;
pub mod question_builder;
pub mod quiz_session;
pub mod result_recorder;
pub mod session_service;
pub mod stats_aggregator;
pub mod weak_words;
