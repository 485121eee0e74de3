use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    app_state::AppState, config::Settings, domain::ports::inbound::CardService, routes,
};

pub fn create(config: &Settings, card_service: Arc<dyn CardService>) -> Router<()> {
    let app_state = AppState::new(card_service);

    let app = Router::new()
        .merge(routes::form::router())
        .merge(routes::card::router())
        .nest_service("/static", ServeDir::new(&config.application.static_dir));

    // Cross-origin form posts are only accepted from the public URL's origin.
    let public_origin = config.application.public_url.origin().ascii_serialization();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _| origin.as_bytes() == public_origin.as_bytes(),
        ));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
