//! Service status.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}

/// GET /api/status — version, model target and availability, lead count.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let client = state.client();
    let available = client.is_available().await;

    Json(serde_json::json!({
        "service": "leadscout",
        "version": env!("CARGO_PKG_VERSION"),
        "model": {
            "enabled": state.model_config.enabled,
            "target": client.describe(),
            "available": available,
            "reason": if available { None } else { Some(client.unavailable_reason()) },
        },
        "leads": state.store.len(),
        "dataDir": state.config.data_paths.root.display().to_string(),
    }))
}
