//! LanceDB connection and table lifecycle.
//!
//! `LanceVectorStore` wraps a `lancedb::Connection` rooted at the index
//! directory and offers helpers to create, open and drop tables.

use std::path::PathBuf;
use std::sync::Arc;

use arrow_schema::Schema;

/// LanceDB connection at a filesystem path.
pub struct LanceVectorStore {
    db: lancedb::Connection,
}

impl LanceVectorStore {
    /// Open or create a store at `base_path`, creating the directory if needed.
    pub async fn new(base_path: PathBuf) -> Result<Self, lancedb::Error> {
        std::fs::create_dir_all(&base_path).map_err(|e| lancedb::Error::CreateDir {
            path: base_path.display().to_string(),
            source: e,
        })?;

        let uri = base_path
            .to_str()
            .ok_or_else(|| lancedb::Error::InvalidInput {
                message: format!("Path contains invalid UTF-8: {}", base_path.display()),
            })?;

        let db = lancedb::connect(uri).execute().await?;

        Ok(Self { db })
    }

    /// Open `table_name`, creating it empty with `schema` when missing.
    pub async fn ensure_table(
        &self,
        table_name: &str,
        schema: Arc<Schema>,
    ) -> Result<lancedb::Table, lancedb::Error> {
        match self.db.open_table(table_name).execute().await {
            Ok(table) => Ok(table),
            Err(lancedb::Error::TableNotFound { .. }) => {
                self.db
                    .create_empty_table(table_name, schema)
                    .execute()
                    .await
            }
            Err(e) => Err(e),
        }
    }

    /// Open an existing table; `None` when it does not exist.
    pub async fn open_table(&self, table_name: &str) -> Result<Option<lancedb::Table>, lancedb::Error> {
        match self.db.open_table(table_name).execute().await {
            Ok(table) => Ok(Some(table)),
            Err(lancedb::Error::TableNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Drop a table. Dropping a missing table succeeds.
    pub async fn drop_table(&self, table_name: &str) -> Result<(), lancedb::Error> {
        match self.db.drop_table(table_name, &[]).await {
            Ok(()) => Ok(()),
            Err(lancedb::Error::TableNotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::schema::document_chunks_schema;

    async fn store() -> (LanceVectorStore, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = LanceVectorStore::new(temp_dir.path().join("index"))
            .await
            .expect("Failed to create vector store");
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let (_store, tmp) = store().await;
        assert!(tmp.path().join("index").is_dir());
    }

    #[tokio::test]
    async fn test_ensure_table_creates_and_reopens() {
        let (store, _tmp) = store().await;
        let schema = Arc::new(document_chunks_schema());

        assert!(store.open_table("medicalbot").await.unwrap().is_none());

        let table = store
            .ensure_table("medicalbot", schema.clone())
            .await
            .expect("Failed to create table");
        assert_eq!(table.count_rows(None).await.unwrap(), 0);

        store
            .ensure_table("medicalbot", schema)
            .await
            .expect("Failed to reopen table");
        assert!(store.open_table("medicalbot").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_drop_table_idempotent() {
        let (store, _tmp) = store().await;
        store
            .ensure_table("to_drop", Arc::new(document_chunks_schema()))
            .await
            .unwrap();
        assert!(store.open_table("to_drop").await.unwrap().is_some());

        store.drop_table("to_drop").await.unwrap();
        assert!(store.open_table("to_drop").await.unwrap().is_none());

        store
            .drop_table("to_drop")
            .await
            .expect("Second drop should be idempotent");
    }
}
