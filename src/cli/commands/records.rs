use serde_json::Value;

use crate::cli::utils::{get_json, output_empty_collection, output_records};
use crate::cli::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub enum Listing {
    Leads,
    Owners,
}

impl Listing {
    fn path(&self) -> &'static str {
        match self {
            Listing::Leads => "/api/leads",
            Listing::Owners => "/api/owners",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Listing::Leads => "leads",
            Listing::Owners => "owners",
        }
    }

    /// Columns shown in text output
    fn columns(&self) -> &'static [&'static str] {
        match self {
            Listing::Leads => &["id", "name", "email", "status", "created_at"],
            Listing::Owners => &["id", "name", "email", "status", "onboarding_completed"],
        }
    }
}

pub async fn list(
    url: &str,
    listing: Listing,
    skip: Option<u64>,
    limit: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut query = Vec::new();
    if let Some(skip) = skip {
        query.push(("skip", skip.to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }

    let (status, body) = get_json(url, listing.path(), &query).await?;
    if !status.is_success() {
        let message = body.get("error").and_then(Value::as_str).unwrap_or("request failed");
        anyhow::bail!("{} ({})", message, status);
    }

    let records = body.get("data").and_then(Value::as_array).cloned().unwrap_or_default();
    if records.is_empty() {
        return output_empty_collection(&output_format, listing.name(), &format!("No {} found", listing.name()));
    }
    output_records(&output_format, listing.name(), listing.columns(), &records)
}
