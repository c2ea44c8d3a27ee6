use axum::extract::{Multipart, Path, State};

use crate::app::AppState;
use crate::database::models::{PropertyDocumentation, SecuritySystemItem, SecuritySystemItemCreate, SecuritySystemItemPatch};
use crate::middleware::{ApiResponse, ApiResult, JsonObject, Message};
use crate::services::media::MediaRecord;

use super::upload::read_upload;

pub async fn get(State(state): State<AppState>, Path(owner_id): Path<String>) -> ApiResult<PropertyDocumentation> {
    Ok(ApiResponse::success(state.documentation().get(&owner_id).await?))
}

/// GET .../security-systems - empty when the owner has no documentation yet
pub async fn list_items(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> ApiResult<Vec<SecuritySystemItem>> {
    Ok(ApiResponse::success(state.documentation().list_items(&owner_id).await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
) -> ApiResult<SecuritySystemItem> {
    Ok(ApiResponse::success(state.documentation().get_item(&owner_id, &item_id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(create): JsonObject<SecuritySystemItemCreate>,
) -> ApiResult<SecuritySystemItem> {
    Ok(ApiResponse::created(state.documentation().create_item(&owner_id, create).await?))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
    JsonObject(patch): JsonObject<SecuritySystemItemPatch>,
) -> ApiResult<SecuritySystemItem> {
    Ok(ApiResponse::success(state.documentation().update_item(&owner_id, &item_id, patch).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
) -> ApiResult<Message> {
    state.documentation().delete_item(&owner_id, &item_id).await?;
    Ok(ApiResponse::success(Message::new("Security system item deleted successfully")))
}

/// POST .../security-systems/:item_id/upload-image - optional `caption` form field
pub async fn upload_image(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
    multipart: Multipart,
) -> ApiResult<MediaRecord> {
    let form = read_upload(multipart).await?;
    let image = state
        .documentation()
        .upload_image(&owner_id, &item_id, &form.upload, form.caption)
        .await?;
    Ok(ApiResponse::success(image))
}

pub async fn upload_document(
    State(state): State<AppState>,
    Path((owner_id, item_id)): Path<(String, String)>,
    multipart: Multipart,
) -> ApiResult<MediaRecord> {
    let form = read_upload(multipart).await?;
    let document = state.documentation().upload_document(&owner_id, &item_id, &form.upload).await?;
    Ok(ApiResponse::success(document))
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path((owner_id, item_id, image_id)): Path<(String, String, String)>,
) -> ApiResult<Message> {
    state.documentation().delete_image(&owner_id, &item_id, &image_id).await?;
    Ok(ApiResponse::success(Message::new("Image deleted successfully")))
}
