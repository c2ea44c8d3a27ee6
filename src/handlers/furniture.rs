use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::{
    FurnitureEquipment, FurnitureEquipmentPatch, FurnitureItem, FurnitureItemCreate, FurnitureItemPatch,
};
use crate::middleware::{ApiResponse, ApiResult, JsonObject, Message};

/// GET /api/owners/:owner_id/furniture-equipment - seeds the default checklist on first read
pub async fn get(State(state): State<AppState>, Path(owner_id): Path<String>) -> ApiResult<FurnitureEquipment> {
    Ok(ApiResponse::success(state.furniture().get(&owner_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(patch): JsonObject<FurnitureEquipmentPatch>,
) -> ApiResult<FurnitureEquipment> {
    Ok(ApiResponse::success(state.furniture().update(&owner_id, patch).await?))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(create): JsonObject<FurnitureItemCreate>,
) -> ApiResult<FurnitureItem> {
    Ok(ApiResponse::created(state.furniture().add_item(&owner_id, create).await?))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
    JsonObject(patch): JsonObject<FurnitureItemPatch>,
) -> ApiResult<FurnitureItem> {
    Ok(ApiResponse::success(state.furniture().update_item(&owner_id, &item_id, patch).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
) -> ApiResult<Message> {
    state.furniture().delete_item(&owner_id, &item_id).await?;
    Ok(ApiResponse::success(Message::new("Furniture item deleted successfully")))
}
