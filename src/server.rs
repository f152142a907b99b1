//! JSON HTTP surface over the [`Router`](crate::Router).
//!
//! Routes:
//! - `GET  /api/health`
//! - `GET  /api/sources`
//! - `POST /api/fetch_data` with `{source, data_type}`
//! - `POST /api/download` with `{data, source, data_type, format}`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::core::{DsError, Record};
use crate::export::{self, ExportFormat, ExportMeta};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<crate::Router>,
    /// Country name used in download file names.
    pub country: String,
}

impl AppState {
    pub fn new(router: crate::Router, country: impl Into<String>) -> Self {
        Self {
            router: Arc::new(router),
            country: country.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FetchRequest {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    data_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DownloadRequest {
    #[serde(default)]
    data: Vec<Record>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    data_type: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

/// Build the axum application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/sources", get(list_sources))
        .route("/api/fetch_data", post(fetch_data))
        .route("/api/download", post(download))
        .with_state(state)
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "success": false, "error": message.into() }))).into_response()
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_sources(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sources: Vec<_> = state
        .router
        .sources()
        .into_iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();
    Json(json!({ "sources": sources }))
}

async fn fetch_data(State(state): State<AppState>, Json(req): Json<FetchRequest>) -> Response {
    let (Some(source), Some(topic)) = (non_blank(req.source), non_blank(req.data_type)) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing source or data_type parameter",
        );
    };

    match state.router.collect(&source, &topic).await {
        Ok(result) if result.is_success() => (StatusCode::OK, Json(result)).into_response(),
        Ok(result) => {
            warn!(%source, %topic, error = result.error().unwrap_or_default(), "collection failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response()
        }
        Err(DsError::UnknownSource(_)) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid data source")
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

async fn download(State(state): State<AppState>, Json(req): Json<DownloadRequest>) -> Response {
    if req.data.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No data provided for download");
    }

    let format = match req.format.as_deref().map(str::parse::<ExportFormat>) {
        None => ExportFormat::Csv,
        Some(Ok(f)) => f,
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let meta = ExportMeta::new(
        non_blank(req.source).unwrap_or_else(|| "unknown".into()),
        non_blank(req.data_type).unwrap_or_else(|| "data".into()),
    );

    match export::render(&req.data, &meta, format) {
        Ok(body) => {
            let name = export::file_name(&state.country, &meta, format);
            (
                [
                    (header::CONTENT_TYPE, format.mime_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{name}\""),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Download failed: {e}"),
        ),
    }
}
