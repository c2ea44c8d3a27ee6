use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use super::store::{Collection, DocumentStore, StoreError};
use crate::filter::{DocFilter, Page};

/// Document store over a single JSONB table.
///
/// Rows are `(seq, collection, body)`; `seq` gives the insertion order that
/// "first match" refers to.
pub struct PgDocumentStore {
    pool: PgPool,
    log_queries: bool,
}

impl PgDocumentStore {
    pub const TABLE_DDL: &'static str = "CREATE TABLE IF NOT EXISTS documents (
        seq BIGSERIAL PRIMARY KEY,
        collection TEXT NOT NULL,
        body JSONB NOT NULL
    )";

    pub const INDEX_DDL: [&'static str; 2] = [
        "CREATE INDEX IF NOT EXISTS documents_collection_owner_idx ON documents (collection, (body ->> 'owner_id'))",
        "CREATE INDEX IF NOT EXISTS documents_collection_id_idx ON documents (collection, (body ->> 'id'))",
    ];

    pub fn new(pool: PgPool, log_queries: bool) -> Self {
        Self { pool, log_queries }
    }

    /// Create the documents table and its lookup indexes
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::query(Self::TABLE_DDL).execute(&self.pool).await?;
        for ddl in Self::INDEX_DDL {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Subselect yielding the `seq` of the first match. `$1` is the collection.
    fn first_match_sql(filter: &DocFilter) -> Result<(String, Vec<Value>), StoreError> {
        let where_sql = filter.to_where_sql(1)?;
        let query = format!(
            "SELECT seq FROM documents WHERE collection = $1 AND {} ORDER BY seq LIMIT 1",
            where_sql.query
        );
        Ok((query, where_sql.params))
    }

    /// Advisory lock key shared by every upsert addressing the same documents
    fn upsert_lock_key(collection: Collection, filter: &DocFilter) -> Result<String, StoreError> {
        let where_sql = filter.to_where_sql(1)?;
        Ok(format!(
            "{}|{}|{}",
            collection.as_str(),
            where_sql.query,
            Value::Array(where_sql.params)
        ))
    }

    fn log(&self, sql: &str) {
        if self.log_queries {
            debug!("SQL: {}", sql);
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn find_one(&self, collection: Collection, filter: &DocFilter) -> Result<Option<Value>, StoreError> {
        let where_sql = filter.to_where_sql(1)?;
        let sql = format!(
            "SELECT body FROM documents WHERE collection = $1 AND {} ORDER BY seq LIMIT 1",
            where_sql.query
        );
        self.log(&sql);

        let mut query = sqlx::query_scalar::<_, Value>(&sql).bind(collection.as_str());
        for param in where_sql.params {
            query = query.bind(param);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn find_many(&self, collection: Collection, filter: &DocFilter, page: Page) -> Result<Vec<Value>, StoreError> {
        let where_sql = filter.to_where_sql(1)?;
        let limit_clause = if page.limit == usize::MAX {
            format!("OFFSET {}", page.skip)
        } else {
            format!("LIMIT {} OFFSET {}", page.limit, page.skip)
        };
        let sql = format!(
            "SELECT body FROM documents WHERE collection = $1 AND {} ORDER BY seq {}",
            where_sql.query, limit_clause
        );
        self.log(&sql);

        let mut query = sqlx::query_scalar::<_, Value>(&sql).bind(collection.as_str());
        for param in where_sql.params {
            query = query.bind(param);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn insert(&self, collection: Collection, doc: Value) -> Result<(), StoreError> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let sql = "INSERT INTO documents (collection, body) VALUES ($1, $2)";
        self.log(sql);
        sqlx::query(sql)
            .bind(collection.as_str())
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert(&self, collection: Collection, filter: &DocFilter, doc: Value) -> Result<(), StoreError> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let lock_key = Self::upsert_lock_key(collection, filter)?;
        let (subselect, params) = Self::first_match_sql(filter)?;
        let body_param = params.len() + 2;
        let sql = format!("UPDATE documents SET body = ${} WHERE seq = ({})", body_param, subselect);
        self.log(&sql);

        // Concurrent upserts on the same filter queue on the lock, so the second
        // one sees the first one's row and updates it instead of inserting.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(lock_key.as_str())
            .execute(&mut *tx)
            .await?;

        let mut query = sqlx::query(&sql).bind(collection.as_str());
        for param in params {
            query = query.bind(param);
        }
        let result = query.bind(doc.clone()).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            sqlx::query("INSERT INTO documents (collection, body) VALUES ($1, $2)")
                .bind(collection.as_str())
                .bind(doc)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn update_fields(
        &self,
        collection: Collection,
        filter: &DocFilter,
        fields: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let (subselect, params) = Self::first_match_sql(filter)?;
        let fields_param = params.len() + 2;
        let sql = format!(
            "UPDATE documents SET body = body || ${} WHERE seq = ({}) RETURNING body",
            fields_param, subselect
        );
        self.log(&sql);

        let mut query = sqlx::query_scalar::<_, Value>(&sql).bind(collection.as_str());
        for param in params {
            query = query.bind(param);
        }
        Ok(query.bind(Value::Object(fields)).fetch_optional(&self.pool).await?)
    }

    async fn delete_one(&self, collection: Collection, filter: &DocFilter) -> Result<bool, StoreError> {
        let (subselect, params) = Self::first_match_sql(filter)?;
        let sql = format!("DELETE FROM documents WHERE seq = ({})", subselect);
        self.log(&sql);

        let mut query = sqlx::query(&sql).bind(collection.as_str());
        for param in params {
            query = query.bind(param);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_numbers_after_collection() {
        let (sql, params) = PgDocumentStore::first_match_sql(&DocFilter::by_owner("o1").eq("id", "p1")).unwrap();
        assert_eq!(
            sql,
            "SELECT seq FROM documents WHERE collection = $1 AND \"body\" -> 'owner_id' = $2 AND \"body\" -> 'id' = $3 ORDER BY seq LIMIT 1"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn upsert_lock_key_is_per_collection_and_owner() {
        let key = |collection, owner| PgDocumentStore::upsert_lock_key(collection, &DocFilter::by_owner(owner)).unwrap();
        assert_eq!(key(Collection::FloorPlans, "o1"), key(Collection::FloorPlans, "o1"));
        assert_ne!(key(Collection::FloorPlans, "o1"), key(Collection::FloorPlans, "o2"));
        assert_ne!(key(Collection::FloorPlans, "o1"), key(Collection::AccessAndLocks, "o1"));
    }

    /// Runs against `TEST_DATABASE_URL` when set
    #[tokio::test]
    async fn concurrent_first_upserts_leave_one_document() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let pool = sqlx::PgPool::connect(&url).await.unwrap();
        let store = std::sync::Arc::new(PgDocumentStore::new(pool, false));
        store.bootstrap().await.unwrap();

        let owner_id = crate::types::new_id();
        let filter = DocFilter::by_owner(&owner_id);
        let writers: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                let filter = filter.clone();
                let doc = serde_json::json!({"owner_id": owner_id, "comment": n});
                tokio::spawn(async move { store.upsert(Collection::FloorPlans, &filter, doc).await })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let docs = store.find_many(Collection::FloorPlans, &filter, Page::all()).await.unwrap();
        assert_eq!(docs.len(), 1);
    }
}
