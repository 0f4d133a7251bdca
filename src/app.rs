use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chart.svg", get(handlers::chart_svg))
        .route("/api/tools", get(handlers::get_tools))
        .route("/api/chart", get(handlers::get_chart))
        .with_state(state)
}
