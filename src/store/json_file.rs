use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{Asset, JournalEntry, JournalEntryPatch, Operation, OperationPatch};
use crate::store::{JournalRepository, OperationRepository, StoreState};

/// Store persisted as a single pretty-printed JSON document. Every mutation
/// rewrites the file.
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    pub async fn open(cfg: &Config) -> Result<Self> {
        Self::open_path(cfg.store_path(), cfg.seed_sample_data).await
    }

    /// Load `path`, or start a new state (seeded or empty) if it does not exist.
    /// A file that exists but does not parse is an error rather than being
    /// silently replaced.
    pub async fn open_path(path: impl Into<PathBuf>, seed: bool) -> Result<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<StoreState>(&content) {
                Ok(state) => {
                    info!(
                        "Loaded {} operation(s) and {} journal entr(ies) from {}",
                        state.operations.len(),
                        state.journal_entries.len(),
                        path.display()
                    );
                    state
                }
                Err(e) => {
                    warn!("Store file {} is not valid: {}", path.display(), e);
                    return Err(e).with_context(|| format!("parsing {}", path.display()));
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No store at {}, starting {}", path.display(), if seed { "with sample data" } else { "empty" });
                if seed {
                    StoreState::seeded()
                } else {
                    StoreState::default()
                }
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, state: &StoreState) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    /// Apply `f` to the state and persist the result. The in-memory state is
    /// only replaced once the file write succeeded.
    async fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreState) -> Result<T>,
        T: Send,
    {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.save(&next).await?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl OperationRepository for JsonFileStore {
    async fn list(&self) -> Result<Vec<Operation>> {
        Ok(self.state.read().await.operations.clone())
    }

    async fn get(&self, id: u64) -> Result<Option<Operation>> {
        let state = self.state.read().await;
        Ok(state.operations.iter().find(|o| o.id == Some(id)).cloned())
    }

    async fn add(&self, operation: Operation) -> Result<Operation> {
        self.mutate(|s| Ok(s.add_operation(operation, Utc::now())?))
            .await
    }

    async fn update(&self, id: u64, patch: OperationPatch) -> Result<Operation> {
        self.mutate(|s| Ok(s.update_operation(id, &patch, Utc::now())?))
            .await
    }

    async fn delete(&self, id: u64) -> Result<Operation> {
        self.mutate(|s| Ok(s.delete_operation(id, Utc::now())?))
            .await
    }

    async fn import(&self, operations: Vec<Operation>) -> Result<Vec<Operation>> {
        let imported = self
            .mutate(|s| Ok(s.import_operations(operations, Utc::now())?))
            .await?;
        info!("Imported {} operation(s)", imported.len());
        Ok(imported)
    }

    async fn assets(&self) -> Result<Vec<Asset>> {
        Ok(self.state.read().await.assets.clone())
    }
}

#[async_trait]
impl JournalRepository for JsonFileStore {
    async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.state.read().await.journal_entries.clone())
    }

    async fn entry_for_operation(&self, operation_id: u64) -> Result<Option<JournalEntry>> {
        Ok(self
            .state
            .read()
            .await
            .entry_for_operation(operation_id)
            .cloned())
    }

    async fn add_entry(&self, entry: JournalEntry) -> Result<JournalEntry> {
        self.mutate(|s| Ok(s.add_entry(entry, Utc::now())?)).await
    }

    async fn update_entry(&self, id: u64, patch: JournalEntryPatch) -> Result<JournalEntry> {
        self.mutate(|s| Ok(s.update_entry(id, &patch, Utc::now())?))
            .await
    }

    async fn delete_entry(&self, id: u64) -> Result<JournalEntry> {
        self.mutate(|s| Ok(s.delete_entry(id, Utc::now())?))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{default_test_config, op};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("trading_journal_store_{}_{}", std::process::id(), name))
            .join("trading-storage.json")
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        let store = JsonFileStore::open_path(&path, false).await.unwrap();
        store.add(op("2025-04-01", "EURUSD", 30.0)).await.unwrap();
        store
            .add_entry(JournalEntry::new(
                1,
                crate::models::EmotionalState::Calm,
                "patient",
                "",
            ))
            .await
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open_path(&path, false).await.unwrap();
        let ops = reopened.list().await.unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].profit_loss, 30.0);
        assert_eq!(reopened.list_entries().await.unwrap().len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_starts_from_seed() {
        let path = temp_path("seed");
        let _ = std::fs::remove_file(&path);
        let store = JsonFileStore::open_path(&path, true).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 10);
        // Nothing is written until the first mutation.
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileStore::open_path(&path, true).await.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn failed_mutation_does_not_write() {
        let path = temp_path("failed");
        let _ = std::fs::remove_file(&path);
        let store = JsonFileStore::open_path(&path, false).await.unwrap();
        assert!(store.delete(3).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn open_uses_config_path() {
        let mut cfg = default_test_config();
        cfg.namespace = format!("cfg-path-{}", std::process::id());
        let store = JsonFileStore::open(&cfg).await.unwrap();
        assert_eq!(store.path(), cfg.store_path().as_path());
    }
}
