use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::store::{Collection, DocumentStore, StoreError};
use crate::filter::{DocFilter, Page};

/// Process-local store used when no database is configured, and by the test suite
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections.read().await.get(&collection).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_one(&self, collection: Collection, filter: &DocFilter) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find_many(&self, collection: Collection, filter: &DocFilter, page: Page) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .skip(page.skip)
                    .take(page.limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: Collection, doc: Value) -> Result<(), StoreError> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }
        self.collections.write().await.entry(collection).or_default().push(doc);
        Ok(())
    }

    async fn upsert(&self, collection: Collection, filter: &DocFilter, doc: Value) -> Result<(), StoreError> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        match docs.iter_mut().find(|existing| filter.matches(existing)) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        Ok(())
    }

    async fn update_fields(
        &self,
        collection: Collection,
        filter: &DocFilter,
        fields: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)))
        else {
            return Ok(None);
        };
        let object = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;
        object.extend(fields);
        Ok(Some(doc.clone()))
    }

    async fn delete_one(&self, collection: Collection, filter: &DocFilter) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_replaces_first_match_or_inserts() {
        let store = MemoryStore::new();
        let filter = DocFilter::by_owner("o1");

        store.upsert(Collection::FloorPlans, &filter, json!({"owner_id": "o1", "comment": "a"})).await.unwrap();
        store.upsert(Collection::FloorPlans, &filter, json!({"owner_id": "o1", "comment": "b"})).await.unwrap();

        assert_eq!(store.count(Collection::FloorPlans).await, 1);
        let doc = store.find_one(Collection::FloorPlans, &filter).await.unwrap().unwrap();
        assert_eq!(doc["comment"], "b");
    }

    #[tokio::test]
    async fn concurrent_first_upserts_leave_one_document() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let writers: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    let doc = json!({"owner_id": "o1", "comment": n});
                    store.upsert(Collection::FloorPlans, &DocFilter::by_owner("o1"), doc).await
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }
        assert_eq!(store.count(Collection::FloorPlans).await, 1);
    }

    #[tokio::test]
    async fn update_fields_merges_shallowly() {
        let store = MemoryStore::new();
        store.insert(Collection::Partners, json!({"id": "p1", "name": "A", "phone": "1"})).await.unwrap();

        let mut fields = Map::new();
        fields.insert("name".into(), json!("B"));
        let updated = store.update_fields(Collection::Partners, &DocFilter::by_id("p1"), fields).await.unwrap().unwrap();
        assert_eq!(updated, json!({"id": "p1", "name": "B", "phone": "1"}));

        let missing = store.update_fields(Collection::Partners, &DocFilter::by_id("nope"), Map::new()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_one_removes_only_first_match() {
        let store = MemoryStore::new();
        store.insert(Collection::Leads, json!({"id": "x", "n": 1})).await.unwrap();
        store.insert(Collection::Leads, json!({"id": "x", "n": 2})).await.unwrap();

        assert!(store.delete_one(Collection::Leads, &DocFilter::by_id("x")).await.unwrap());
        let rest = store.find_many(Collection::Leads, &DocFilter::new(), Page::all()).await.unwrap();
        assert_eq!(rest, vec![json!({"id": "x", "n": 2})]);
        assert!(!store.delete_one(Collection::Owners, &DocFilter::by_id("x")).await.unwrap());
    }

    #[tokio::test]
    async fn find_many_pages_in_insertion_order() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.insert(Collection::Leads, json!({"n": n})).await.unwrap();
        }
        let page = store.find_many(Collection::Leads, &DocFilter::new(), Page { skip: 1, limit: 2 }).await.unwrap();
        assert_eq!(page, vec![json!({"n": 1}), json!({"n": 2})]);
    }
}
