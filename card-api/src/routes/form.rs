use axum::{response::Html, routing::get, Router};

use crate::app_state::AppState;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
