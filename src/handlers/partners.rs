use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::{Partner, PartnerCreate, PartnerPatch};
use crate::middleware::{ApiResponse, ApiResult, JsonObject, Message};

/// GET /api/partners/:owner_id
pub async fn list(State(state): State<AppState>, Path(owner_id): Path<String>) -> ApiResult<Vec<Partner>> {
    Ok(ApiResponse::success(state.partners().list(&owner_id).await?))
}

/// POST /api/partners/:owner_id
pub async fn create(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(create): JsonObject<PartnerCreate>,
) -> ApiResult<Partner> {
    Ok(ApiResponse::created(state.partners().create(&owner_id, create).await?))
}

/// PUT /api/partners/:owner_id/:partner_id - null and absent fields are left untouched
pub async fn update(
    State(state): State<AppState>,
    Path((owner_id, partner_id)): Path<(String, String)>,
    JsonObject(patch): JsonObject<PartnerPatch>,
) -> ApiResult<Partner> {
    Ok(ApiResponse::success(state.partners().update(&owner_id, &partner_id, patch).await?))
}

/// DELETE /api/partners/:owner_id/:partner_id
pub async fn delete(
    State(state): State<AppState>,
    Path((owner_id, partner_id)): Path<(String, String)>,
) -> ApiResult<Message> {
    state.partners().delete(&owner_id, &partner_id).await?;
    Ok(ApiResponse::success(Message::new("Partner deleted successfully")))
}
