// HTTP request handlers
use crate::domain::chart::ChartModel;
use crate::infrastructure::html_render::render_page;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

#[derive(Debug, Serialize, PartialEq)]
pub struct LightView {
    pub text: Option<String>,
    pub classes: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/charts/:id", get(chart_json))
        .route("/api/light", get(light_json))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard page with the light status and every chart
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = state.dashboard.page().await;
    let charts = state.dashboard.charts().await;
    Html(render_page(
        &page,
        state.dashboard.status_targets(),
        &charts,
        state.refresh_secs,
    ))
}

/// Current labels and data for one chart
pub async fn chart_json(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartModel>, StatusCode> {
    match state.dashboard.chart(&id).await {
        Some(chart) => Ok(Json(chart)),
        None => {
            tracing::debug!(chart = %id, "unknown chart requested");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Light status text and body classes
pub async fn light_json(State(state): State<Arc<AppState>>) -> Json<LightView> {
    let page = state.dashboard.page().await;
    let targets = state.dashboard.status_targets();
    Json(LightView {
        text: page.text(&targets.text_element).map(str::to_string),
        classes: page.class_attr(&targets.body_element),
    })
}
