//! HTTP routes
//!
//! Two endpoints: the dashboard shell at `/` and the JSON report at
//! `/listapps`. The dashboard fetches `/listapps` from the browser, so both
//! serve the same data.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use tracing::error;

use crate::report::aggregate::ReportSource;
use crate::server::cache::ReportCache;

pub fn build_router<S>(cache: Arc<ReportCache<S>>) -> Router
where
    S: ReportSource + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/listapps", get(list_apps::<S>))
        .with_state(cache)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

async fn list_apps<S>(State(cache): State<Arc<ReportCache<S>>>) -> Response
where
    S: ReportSource + 'static,
{
    match cache.payload(Utc::now()).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!("Failed to build app report: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
