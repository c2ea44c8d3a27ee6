use axum::extract::{Path, Query, State};

use crate::app::AppState;
use crate::database::models::{Lead, LeadCreate};
use crate::middleware::{ApiResponse, ApiResult, JsonObject};

use super::ListQuery;

/// POST /api/leads - submit the landing-page form (upsert by email)
pub async fn create(State(state): State<AppState>, JsonObject(create): JsonObject<LeadCreate>) -> ApiResult<Lead> {
    let lead = state.leads().submit(create).await?;
    Ok(ApiResponse::created(lead))
}

/// GET /api/leads
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<Lead>> {
    let leads = state.leads().list(query.page()?).await?;
    Ok(ApiResponse::success(leads))
}

/// GET /api/leads/:lead_id
pub async fn get(State(state): State<AppState>, Path(lead_id): Path<String>) -> ApiResult<Lead> {
    Ok(ApiResponse::success(state.leads().get(&lead_id).await?))
}
