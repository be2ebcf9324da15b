//! Price table persistence
//!
//! A [`DocumentStore`] holds opaque JSON documents by key. [`PriceTableStore`]
//! keeps the single admin-editable price document on top of it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::auth::{verify_admin, Credentials};
use crate::config::AdminConfig;
use crate::pricing::{merge_bytes_over_defaults, PriceTable};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid login or password")]
    Unauthorized,

    #[error("price edits are disabled on this deployment")]
    WritesDisabled,

    #[error("invalid price table: {0}")]
    Invalid(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keyed blob storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when nothing has been written under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the document under `key`
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// One `<key>.json` file per document under a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;

        // Each write fills its own temp file and renames it over the target,
        // so readers never see a half-written document and the last rename wins
        let root = self.root.clone();
        let target = self.path_for(key);
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&root)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(std::io::Error::other)??;

        Ok(())
    }
}

/// In-process store for tests and `--ephemeral` runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.docs.write().await.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// The admin-editable price document
///
/// Writes are last-writer-wins; there is no versioning.
pub struct PriceTableStore {
    backend: Box<dyn DocumentStore>,
    read_only: bool,
}

impl PriceTableStore {
    pub const KEY: &'static str = "prices";

    pub fn new(backend: Box<dyn DocumentStore>, read_only: bool) -> Self {
        Self { backend, read_only }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Current prices, merged field by field over the defaults
    ///
    /// Never fails. Anything unreadable yields the default document.
    pub async fn load_price_table(&self) -> PriceTable {
        let bytes = match self.backend.get(Self::KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!("No stored price table, using defaults");
                return PriceTable::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read price table, using defaults");
                return PriceTable::default();
            }
        };

        match merge_bytes_over_defaults(&bytes) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "Stored price table is not valid JSON, using defaults");
                PriceTable::default()
            }
        }
    }

    /// Same document as [`load_price_table`](Self::load_price_table), gated by admin credentials
    pub async fn load_price_table_authenticated(
        &self,
        credentials: &Credentials,
        admin: &AdminConfig,
    ) -> Result<PriceTable, StoreError> {
        if !verify_admin(admin, credentials) {
            return Err(StoreError::Unauthorized);
        }
        Ok(self.load_price_table().await)
    }

    /// Overwrite the stored document
    ///
    /// Checks credentials, then the read-only switch, then value ranges.
    /// Nothing is written unless all three pass.
    pub async fn save_price_table(
        &self,
        table: &PriceTable,
        credentials: &Credentials,
        admin: &AdminConfig,
    ) -> Result<(), StoreError> {
        self.check_writable(credentials, admin)?;
        table.validate().map_err(StoreError::Invalid)?;

        let bytes = serde_json::to_vec_pretty(table)?;
        self.backend.put(Self::KEY, &bytes).await?;

        tracing::info!(login = %credentials.login.trim(), "Price table updated");
        Ok(())
    }

    /// Like [`save_price_table`](Self::save_price_table), from a raw JSON body
    ///
    /// Missing sections and keys take their default values.
    pub async fn save_price_table_json(
        &self,
        body: &[u8],
        credentials: &Credentials,
        admin: &AdminConfig,
    ) -> Result<PriceTable, StoreError> {
        self.check_writable(credentials, admin)?;

        let table: PriceTable =
            serde_json::from_slice(body).map_err(|e| StoreError::Invalid(e.to_string()))?;
        self.save_price_table(&table, credentials, admin).await?;

        Ok(table)
    }

    fn check_writable(&self, credentials: &Credentials, admin: &AdminConfig) -> Result<(), StoreError> {
        if !verify_admin(admin, credentials) {
            return Err(StoreError::Unauthorized);
        }
        if self.read_only {
            return Err(StoreError::WritesDisabled);
        }
        Ok(())
    }
}
