use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::AppState;

/// GET / - service information
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "name": "DigiHome API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Owner portal, leads and property checklists",
            "endpoints": {
                "leads": "/api/leads[/:lead_id]",
                "owners": "/api/owner-portal, /api/owners[/:owner_id]",
                "checklists": "/api/owners/:owner_id/{access-locks,floor-plan,furniture-equipment,documentation}",
                "partners": "/api/partners/:owner_id[/:partner_id]",
                "uploads": "/uploads/:file",
            }
        }
    }))
}

/// GET /health - ping the document store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let backend = state.store.backend();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": backend }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": { "status": "degraded", "timestamp": now, "database": backend }
                })),
            )
        }
    }
}
