use axum::extract::Multipart;

use crate::error::ApiError;
use crate::storage::Upload;

/// Parsed multipart upload: the `file` part plus an optional `caption` text part
#[derive(Debug)]
pub struct UploadForm {
    pub upload: Upload,
    pub caption: Option<String>,
}

/// Read the upload form. A missing `file` part is a validation error.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut upload = None;
    let mut caption = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;
                upload = Some(Upload { file_name, content_type, data: data.to_vec() });
            }
            "caption" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid caption: {}", e)))?;
                caption = Some(text);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| ApiError::validation_error("Missing required form field: file"))?;
    Ok(UploadForm { upload, caption })
}
