use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::AccessAndLocks;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::media::MediaRecord;

use super::upload::read_upload;

/// GET /api/owners/:owner_id/access-locks
pub async fn get(State(state): State<AppState>, Path(owner_id): Path<String>) -> ApiResult<AccessAndLocks> {
    Ok(ApiResponse::success(state.access_locks().get(&owner_id).await?))
}

/// PUT /api/owners/:owner_id/access-locks/:section - returns the merged section
pub async fn update_section(
    State(state): State<AppState>,
    Path((owner_id, section)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let merged = state.access_locks().update_section(&owner_id, &section, body).await?;
    Ok(ApiResponse::success(merged))
}

/// POST /api/owners/:owner_id/access-locks/:section/upload-video
pub async fn upload_video(
    State(state): State<AppState>,
    Path((owner_id, section)): Path<(String, String)>,
    multipart: Multipart,
) -> ApiResult<MediaRecord> {
    let form = read_upload(multipart).await?;
    let video = state.access_locks().upload_video(&owner_id, &section, &form.upload).await?;
    Ok(ApiResponse::success(video))
}
