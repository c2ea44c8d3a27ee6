use std::sync::Arc;

use serde_json::Map;
use tracing::info;

use crate::database::models::lead::is_valid_email;
use crate::database::models::{Lead, LeadCreate};
use crate::database::store::{decode, encode, Collection, DocumentStore};
use crate::filter::{DocFilter, Page};

use super::error::ServiceError;

pub struct LeadService {
    store: Arc<dyn DocumentStore>,
}

impl LeadService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Record a lead from the landing-page form.
    ///
    /// A lead with the same email is overwritten by the new one (fresh id,
    /// status reset to `new`). The lookup and the write are separate calls.
    pub async fn submit(&self, create: LeadCreate) -> Result<Lead, ServiceError> {
        if !is_valid_email(&create.email) {
            return Err(ServiceError::Validation(format!("Invalid email address: {}", create.email)));
        }

        let lead = Lead::from(create);
        let by_email = DocFilter::by_email(&lead.email);
        let body = encode(&lead)?;

        if self.store.find_one(Collection::Leads, &by_email).await?.is_some() {
            let fields = match body {
                serde_json::Value::Object(fields) => fields,
                _ => Map::new(),
            };
            self.store.update_fields(Collection::Leads, &by_email, fields).await?;
            info!("Updated existing lead for {}", lead.email);
        } else {
            self.store.insert(Collection::Leads, body).await?;
            info!("New lead {} for {}", lead.id, lead.email);
        }
        Ok(lead)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Lead>, ServiceError> {
        let docs = self.store.find_many(Collection::Leads, &DocFilter::new(), page).await?;
        Ok(docs.into_iter().map(decode::<Lead>).collect::<Result<_, _>>()?)
    }

    pub async fn get(&self, lead_id: &str) -> Result<Lead, ServiceError> {
        match self.store.find_one(Collection::Leads, &DocFilter::by_id(lead_id)).await? {
            Some(doc) => Ok(decode(doc)?),
            None => Err(ServiceError::NotFound("Lead not found".to_string())),
        }
    }
}
