//! Lead export downloads.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use leadscout_store::export;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leads/export.csv", get(export_csv))
        .route("/leads/export.txt", get(export_text))
}

/// GET /api/leads/export.csv
async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    match export::to_csv(&state.store.list()) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", csv_filename()),
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("CSV export failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// GET /api/leads/export.txt
async fn export_text(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        export::to_text(&state.store.list()),
    )
        .into_response()
}

fn csv_filename() -> String {
    format!("job_leads_{}.csv", chrono::Local::now().format("%Y-%m-%d"))
}
