pub mod error;
pub mod pages;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::llm::{AnthropicClient, LlmRewriter};
use crate::models::MappingReport;
use crate::pipeline::{build_report, run_pipeline};

pub use error::AppError;

/// Shared state for the presentation layer
///
/// The catalog is immutable and the client handle is stateless, so
/// overlapping requests are fully independent.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub client: Arc<AnthropicClient>,
}

#[derive(Debug, Deserialize)]
struct MapQuery {
    reg_id: Option<String>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/map", get(api_map))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the presentation layer until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .await
        .context("Server terminated")?;
    Ok(())
}

/// Landing page: regulation picker, and mapping results when `reg_id` is
/// given. A pipeline failure is rendered as an inline error message rather
/// than crashing the request.
async fn index(State(state): State<AppState>, Query(query): Query<MapQuery>) -> Html<String> {
    let regulation_ids: Vec<String> = state.catalog.regulation_ids().map(String::from).collect();

    let Some(reg_id) = query.reg_id.as_deref().filter(|id| !id.is_empty()) else {
        return Html(pages::render_index(&regulation_ids, None, "", &[], None));
    };

    let rewriter = LlmRewriter::new(&state.client);
    match run_pipeline(&state.catalog, &rewriter, reg_id).await {
        Ok((regulation_text, mapped)) => Html(pages::render_index(
            &regulation_ids,
            Some(reg_id),
            &regulation_text,
            &mapped,
            None,
        )),
        Err(e) => {
            warn!("Mapping run for {} failed: {:#}", reg_id, e);
            Html(pages::render_index(
                &regulation_ids,
                Some(reg_id),
                "",
                &[],
                Some(&format!("{:#}", e)),
            ))
        }
    }
}

/// Machine surface: run the pipeline and return the full report as JSON
async fn api_map(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MappingReport>, AppError> {
    let reg_id = query
        .reg_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("missing reg_id query parameter".to_string()))?;

    if state.catalog.fetch_regulation(reg_id).is_empty() {
        return Err(AppError::NotFound(format!("unknown regulation id: {}", reg_id)));
    }

    let rewriter = LlmRewriter::new(&state.client);
    let (regulation_text, mapped) = run_pipeline(&state.catalog, &rewriter, reg_id)
        .await
        .map_err(|e| AppError::Upstream(format!("{:#}", e)))?;

    let report = build_report(
        &state.catalog,
        reg_id,
        regulation_text,
        mapped,
        state.client.model(),
    );
    Ok(Json(report))
}

async fn healthz() -> &'static str {
    "ok"
}
