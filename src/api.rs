use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use metrics::counter;
use tower_http::cors::CorsLayer;

use crate::page::{build_page, AppState};

/// Query string of the page route. Unknown parameters are ignored and a
/// repeated `date` resolves to its first value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub date: Option<String>,
}

impl PageQuery {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let date = pairs.into_iter().find(|(k, _)| k == "date").map(|(_, v)| v);
        Self { date }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(article_page))
        .route("/health", get(|| async { "ok" }))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn article_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let q = PageQuery::from_pairs(pairs);
    match build_page(&state, q.date.as_deref()).await {
        Ok(page) => Html(page.html).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, date = ?q.date, "page handler failed");
            counter!("newslite_page_requests_total", "outcome" => "error").increment(1);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("Error: {e:#}"),
            )
                .into_response()
        }
    }
}
