use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// GET `path` on the API at `base_url` and decode the JSON envelope
pub async fn get_json(base_url: &str, path: &str, query: &[(&str, String)]) -> anyhow::Result<(StatusCode, Value)> {
    let base = url::Url::parse(base_url).map_err(|e| anyhow::anyhow!("invalid API url '{}': {}", base_url, e))?;
    let endpoint = base.join(path)?;

    let response = reqwest::Client::new().get(endpoint).query(query).send().await?;
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data_value) = data {
                response["data"] = data_value;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });
            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output records as JSON or as tab-separated `columns`
pub fn output_records(
    output_format: &OutputFormat,
    collection_name: &str,
    columns: &[&str],
    records: &[Value],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: records }))?);
        }
        OutputFormat::Text => {
            println!("{}", columns.join("\t"));
            for record in records {
                println!("{}", text_row(record, columns));
            }
        }
    }
    Ok(())
}

fn text_row(record: &Value, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|column| match record.get(*column) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\t")
}
