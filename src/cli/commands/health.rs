use serde_json::Value;

use crate::cli::utils::{get_json, output_error, output_success};
use crate::cli::OutputFormat;

pub async fn handle(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let (status, body) = get_json(url, "/health", &[]).await?;

    if status.is_success() {
        let database = body
            .pointer("/data/database")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        output_success(
            &output_format,
            &format!("{} is healthy (database: {})", url, database),
            body.get("data").cloned(),
        )
    } else {
        let message = body.get("error").and_then(Value::as_str).unwrap_or("unhealthy");
        output_error(&output_format, &format!("{}: {}", url, message), Some(status.as_str()))?;
        anyhow::bail!("health check failed with status {}", status)
    }
}
