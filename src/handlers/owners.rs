use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::{LoginRequest, OwnerCreate, OwnerView, StatusUpdate};
use crate::middleware::{ApiResponse, ApiResult, JsonObject};

use super::ListQuery;

/// POST /api/owner-portal - create an owner portal, converting a matching lead
pub async fn create(State(state): State<AppState>, JsonObject(create): JsonObject<OwnerCreate>) -> ApiResult<OwnerView> {
    let owner = state.owners().create(create).await?;
    Ok(ApiResponse::created(owner))
}

/// GET /api/owners and /api/owner-portal/all
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<OwnerView>> {
    let owners = state.owners().list(query.page()?).await?;
    Ok(ApiResponse::success(owners))
}

/// POST /api/owners/login - look up the portal by email
pub async fn login(State(state): State<AppState>, JsonObject(login): JsonObject<LoginRequest>) -> ApiResult<OwnerView> {
    Ok(ApiResponse::success(state.owners().login(&login.email).await?))
}

/// GET /api/owners/:owner_id
pub async fn get(State(state): State<AppState>, Path(owner_id): Path<String>) -> ApiResult<OwnerView> {
    Ok(ApiResponse::success(state.owners().get(&owner_id).await?))
}

/// PUT /api/owners/:owner_id/onboarding - body is stored verbatim
pub async fn onboarding(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Json(data): Json<Value>,
) -> ApiResult<Value> {
    Ok(ApiResponse::success(state.owners().complete_onboarding(&owner_id, data).await?))
}

/// PUT /api/owners/:owner_id/status
pub async fn status(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(update): JsonObject<StatusUpdate>,
) -> ApiResult<OwnerView> {
    Ok(ApiResponse::success(state.owners().set_status(&owner_id, &update.status).await?))
}
