use axum::extract::{Multipart, Path, State};

use crate::app::AppState;
use crate::database::models::{Annotation, AnnotationCreate, AnnotationPatch, FloorPlan, FloorPlanPatch};
use crate::middleware::{ApiResponse, ApiResult, JsonObject, Message};
use crate::services::media::MediaRecord;

use super::upload::read_upload;

pub async fn get(State(state): State<AppState>, Path(owner_id): Path<String>) -> ApiResult<FloorPlan> {
    Ok(ApiResponse::success(state.floor_plans().get(&owner_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(patch): JsonObject<FloorPlanPatch>,
) -> ApiResult<FloorPlan> {
    Ok(ApiResponse::success(state.floor_plans().update(&owner_id, patch).await?))
}

/// POST /api/owners/:owner_id/floor-plan/upload-image - returns `{ image_url }`
pub async fn upload_image(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<MediaRecord> {
    let form = read_upload(multipart).await?;
    Ok(ApiResponse::success(state.floor_plans().upload_image(&owner_id, &form.upload).await?))
}

pub async fn add_annotation(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    JsonObject(create): JsonObject<AnnotationCreate>,
) -> ApiResult<Annotation> {
    Ok(ApiResponse::created(state.floor_plans().add_annotation(&owner_id, create).await?))
}

pub async fn update_annotation(
    State(state): State<AppState>,
    Path((owner_id, annotation_id)): Path<(String, String)>,
    JsonObject(patch): JsonObject<AnnotationPatch>,
) -> ApiResult<Annotation> {
    let annotation = state.floor_plans().update_annotation(&owner_id, &annotation_id, patch).await?;
    Ok(ApiResponse::success(annotation))
}

pub async fn delete_annotation(
    State(state): State<AppState>,
    Path((owner_id, annotation_id)): Path<(String, String)>,
) -> ApiResult<Message> {
    state.floor_plans().delete_annotation(&owner_id, &annotation_id).await?;
    Ok(ApiResponse::success(Message::new("Annotation deleted successfully")))
}
