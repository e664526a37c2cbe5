use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::handlers;
use crate::widget::Widget;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub widget: Arc<Widget>,
}

impl AppState {
    pub fn new(config: Config, widget: Arc<Widget>) -> Self {
        Self {
            config: Arc::new(config),
            widget,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route(
            "/search",
            get(handlers::search_query).post(handlers::search_form),
        )
        .route("/popular", get(handlers::popular).post(handlers::popular))
        .route("/api/movies", get(handlers::api_movies))
        .route("/robots.txt", get(robots_txt_handler))
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    let router = router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Path rewriting has to happen before routing, so it wraps the whole router.
    Router::new()
        .fallback_service(router)
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(_req: Request) -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
