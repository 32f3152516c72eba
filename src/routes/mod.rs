pub mod health;
pub mod quiz;
pub mod results;
pub mod stats;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::rate_limit::{new_rps_state, rps_middleware};
use crate::AppState;

pub fn router(state: AppState, public_rps: u32) -> Router {
    let api = Router::new()
        .route("/api/quiz/sessions", post(quiz::start_session))
        .route("/api/quiz/sessions/:id", get(quiz::get_session))
        .route("/api/quiz/sessions/:id/answer", put(quiz::select_answer))
        .route("/api/quiz/sessions/:id/advance", post(quiz::advance_session))
        .route("/api/results", get(results::list_results))
        .route("/api/results/:id", get(results::get_result))
        .route("/api/weak-words", get(stats::list_weak_words))
        .route("/api/weak-words/practice", post(stats::start_weak_word_practice))
        .route("/api/words/:id/stats", get(stats::get_word_stats))
        .layer(axum::middleware::from_fn_with_state(
            new_rps_state(public_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
