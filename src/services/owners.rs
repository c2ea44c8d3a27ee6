use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::info;

use crate::auth::hash_password;
use crate::database::models::lead::is_valid_email;
use crate::database::models::{Lead, LeadStatus, Owner, OwnerCreate, OwnerStatus, OwnerView};
use crate::database::store::{decode, encode, Collection, DocumentStore};
use crate::filter::{DocFilter, Page};

use super::error::ServiceError;
use super::owner_documents::OWNER_NOT_FOUND;

pub const OWNER_EXISTS: &str = "Owner portal already exists for this email";
pub const NO_PORTAL_FOR_EMAIL: &str = "Ingen eierportal funnet. Vennligst registrer deg først.";

pub struct OwnerService {
    store: Arc<dyn DocumentStore>,
}

impl OwnerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create an owner portal and convert the matching lead, if any.
    ///
    /// The duplicate check, lead conversion and owner insert are three separate
    /// store calls with no transaction around them.
    pub async fn create(&self, create: OwnerCreate) -> Result<OwnerView, ServiceError> {
        if !is_valid_email(&create.email) {
            return Err(ServiceError::Validation(format!("Invalid email address: {}", create.email)));
        }

        let by_email = DocFilter::by_email(&create.email);
        if self.store.find_one(Collection::Owners, &by_email).await?.is_some() {
            return Err(ServiceError::Conflict(OWNER_EXISTS.to_string()));
        }

        let password_hash = hash_password(&create.password)?;

        let lead_id = match self.store.find_one(Collection::Leads, &by_email).await? {
            Some(doc) => {
                let lead: Lead = decode(doc)?;
                let mut fields = Map::new();
                fields.insert("status".to_string(), encode(&LeadStatus::Converted)?);
                self.store.update_fields(Collection::Leads, &by_email, fields).await?;
                info!("Lead {} converted to owner", lead.id);
                Some(lead.id)
            }
            None => None,
        };

        let owner = Owner::new(create, password_hash, lead_id);
        self.store.insert(Collection::Owners, encode(&owner)?).await?;
        info!("Created owner portal {}", owner.id);
        Ok(OwnerView::from(owner))
    }

    /// Look up an owner by email. The password is not checked.
    pub async fn login(&self, email: &str) -> Result<OwnerView, ServiceError> {
        match self.store.find_one(Collection::Owners, &DocFilter::by_email(email)).await? {
            Some(doc) => Ok(OwnerView::from(decode::<Owner>(doc)?)),
            None => Err(ServiceError::NotFound(NO_PORTAL_FOR_EMAIL.to_string())),
        }
    }

    pub async fn get(&self, owner_id: &str) -> Result<OwnerView, ServiceError> {
        Ok(OwnerView::from(self.load(owner_id).await?))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<OwnerView>, ServiceError> {
        let docs = self.store.find_many(Collection::Owners, &DocFilter::new(), page).await?;
        let owners = docs.into_iter().map(decode::<Owner>).collect::<Result<Vec<_>, _>>()?;
        Ok(owners.into_iter().map(OwnerView::from).collect())
    }

    /// Store the onboarding answers verbatim and mark onboarding complete
    pub async fn complete_onboarding(&self, owner_id: &str, data: Value) -> Result<Value, ServiceError> {
        let mut fields = Map::new();
        fields.insert("onboarding_data".to_string(), data);
        fields.insert("onboarding_completed".to_string(), Value::Bool(true));
        self.update(owner_id, fields).await?;
        Ok(json!({ "message": "Onboarding completed successfully" }))
    }

    pub async fn set_status(&self, owner_id: &str, status: &str) -> Result<OwnerView, ServiceError> {
        let status: OwnerStatus = status.parse().map_err(ServiceError::BadRequest)?;
        let mut fields = Map::new();
        fields.insert("status".to_string(), encode(&status)?);
        let updated = self.update(owner_id, fields).await?;
        Ok(OwnerView::from(decode::<Owner>(updated)?))
    }

    async fn load(&self, owner_id: &str) -> Result<Owner, ServiceError> {
        match self.store.find_one(Collection::Owners, &DocFilter::by_id(owner_id)).await? {
            Some(doc) => Ok(decode(doc)?),
            None => Err(ServiceError::NotFound(OWNER_NOT_FOUND.to_string())),
        }
    }

    async fn update(&self, owner_id: &str, fields: Map<String, Value>) -> Result<Value, ServiceError> {
        self.store
            .update_fields(Collection::Owners, &DocFilter::by_id(owner_id), fields)
            .await?
            .ok_or_else(|| ServiceError::NotFound(OWNER_NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::LeadCreate;
    use crate::database::MemoryStore;
    use crate::services::LeadService;

    fn signup(email: &str) -> OwnerCreate {
        OwnerCreate {
            address: "Storgata 1, Oslo".into(),
            name: "Kari".into(),
            phone: "12345678".into(),
            email: email.into(),
            password: "hemmelig".into(),
        }
    }

    #[tokio::test]
    async fn creation_converts_matching_lead() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let leads = LeadService::new(store.clone());
        let owners = OwnerService::new(store.clone());

        let lead = leads
            .submit(LeadCreate {
                address: "Storgata 1, Oslo".into(),
                name: "Kari".into(),
                phone: "12345678".into(),
                email: "kari@example.no".into(),
            })
            .await
            .unwrap();
        let owner = owners.create(signup("kari@example.no")).await.unwrap();

        assert_eq!(owner.lead_id.as_deref(), Some(lead.id.as_str()));
        assert_eq!(leads.get(&lead.id).await.unwrap().status, LeadStatus::Converted);
        assert!(!owner.onboarding_completed);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let owners = OwnerService::new(Arc::new(MemoryStore::new()));
        owners.create(signup("kari@example.no")).await.unwrap();
        let err = owners.create(signup("kari@example.no")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(msg) if msg == OWNER_EXISTS));
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let store = Arc::new(MemoryStore::new());
        let owners = OwnerService::new(store.clone());
        let view = owners.create(signup("kari@example.no")).await.unwrap();

        let doc = store.find_one(Collection::Owners, &DocFilter::by_id(&view.id)).await.unwrap().unwrap();
        let hash = doc["password_hash"].as_str().unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(crate::auth::verify_password("hemmelig", hash).unwrap());
    }

    #[tokio::test]
    async fn status_is_enum_checked() {
        let owners = OwnerService::new(Arc::new(MemoryStore::new()));
        let view = owners.create(signup("kari@example.no")).await.unwrap();

        assert!(matches!(owners.set_status(&view.id, "Ukjent").await, Err(ServiceError::BadRequest(_))));
        let updated = owners.set_status(&view.id, "Sendt tilbud").await.unwrap();
        assert_eq!(updated.status, Some(OwnerStatus::SendtTilbud));
        assert!(matches!(owners.set_status("ghost", "Lost").await, Err(ServiceError::NotFound(_))));
    }
}
