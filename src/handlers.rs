use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::render::{render_page, OutputSurface};
use crate::server::AppState;
use crate::tmdb::SearchQuery;
use crate::widget::{Outcome, WidgetState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub state: WidgetState,
    pub latest_token: u64,
    #[serde(flatten)]
    pub surface: OutputSurface,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let surface = state.widget.snapshot().await;
    let fetching = state.widget.state() == WidgetState::Fetching;
    let stylesheet = state.config.appdir.as_ref().map(|_| "/style.css");

    Html(render_page(&surface, fetching, stylesheet))
}

pub async fn search_form(
    State(state): State<AppState>,
    Form(params): Form<SearchParams>,
) -> Redirect {
    run_search(&state, params).await
}

pub async fn search_query(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Redirect {
    run_search(&state, params).await
}

async fn run_search(state: &AppState, params: SearchParams) -> Redirect {
    // Failures are already drawn on the surface; the page shows them.
    if let Outcome::Stale = state.widget.submit(SearchQuery::from(params.query)).await {
        tracing::debug!("Search superseded by a newer request");
    }
    Redirect::to("/")
}

pub async fn popular(State(state): State<AppState>) -> Redirect {
    state.widget.load_popular().await;
    Redirect::to("/")
}

pub async fn api_movies(State(state): State<AppState>) -> impl IntoResponse {
    Json(MoviesResponse {
        state: state.widget.state(),
        latest_token: state.widget.latest_token(),
        surface: state.widget.snapshot().await,
    })
}
