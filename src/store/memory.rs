use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Asset, JournalEntry, JournalEntryPatch, Operation, OperationPatch};
use crate::store::{JournalRepository, OperationRepository, StoreState};

/// Process-local store. Nothing survives a restart.
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn empty() -> Self {
        Self::new(StoreState::default())
    }

    pub fn seeded() -> Self {
        Self::new(StoreState::seeded())
    }
}

#[async_trait]
impl OperationRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Operation>> {
        Ok(self.state.read().await.operations.clone())
    }

    async fn get(&self, id: u64) -> Result<Option<Operation>> {
        let state = self.state.read().await;
        Ok(state.operations.iter().find(|o| o.id == Some(id)).cloned())
    }

    async fn add(&self, operation: Operation) -> Result<Operation> {
        Ok(self.state.write().await.add_operation(operation, Utc::now())?)
    }

    async fn update(&self, id: u64, patch: OperationPatch) -> Result<Operation> {
        Ok(self
            .state
            .write()
            .await
            .update_operation(id, &patch, Utc::now())?)
    }

    async fn delete(&self, id: u64) -> Result<Operation> {
        Ok(self.state.write().await.delete_operation(id, Utc::now())?)
    }

    async fn import(&self, operations: Vec<Operation>) -> Result<Vec<Operation>> {
        Ok(self
            .state
            .write()
            .await
            .import_operations(operations, Utc::now())?)
    }

    async fn assets(&self) -> Result<Vec<Asset>> {
        Ok(self.state.read().await.assets.clone())
    }
}

#[async_trait]
impl JournalRepository for MemoryStore {
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
        Ok(self.state.write().await.add_entry(entry, Utc::now())?)
    }

    async fn update_entry(&self, id: u64, patch: JournalEntryPatch) -> Result<JournalEntry> {
        Ok(self
            .state
            .write()
            .await
            .update_entry(id, &patch, Utc::now())?)
    }

    async fn delete_entry(&self, id: u64) -> Result<JournalEntry> {
        Ok(self.state.write().await.delete_entry(id, Utc::now())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;
    use crate::test_helpers::op;

    #[tokio::test]
    async fn crud_through_the_trait() {
        let store = MemoryStore::empty();
        let added = store.add(op("2025-04-01", "EURUSD", 30.0)).await.unwrap();
        assert_eq!(added.id, Some(1));

        let updated = store
            .update(
                1,
                OperationPatch {
                    profit_loss: Some(-4.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profit_loss, -4.0);
        assert_eq!(store.get(1).await.unwrap().unwrap().profit_loss, -4.0);

        store.delete(1).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_is_a_journal_error() {
        let store = MemoryStore::empty();
        let err = store.delete(7).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::OperationNotFound(7))
        ));
    }

    #[tokio::test]
    async fn duplicate_id_leaves_one_record() {
        let store = MemoryStore::seeded();
        let mut clash = op("2025-04-20", "EURUSD", 8.0);
        clash.id = Some(3);
        let err = store.add(clash).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::DuplicateOperationId(3))
        ));

        store.delete(3).await.unwrap();
        assert!(store.get(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeded_store_has_reference_data() {
        let store = MemoryStore::seeded();
        assert_eq!(store.assets().await.unwrap().len(), 10);
        assert_eq!(store.list_entries().await.unwrap().len(), 4);
        assert!(store.entry_for_operation(3).await.unwrap().is_some());
        assert!(store.entry_for_operation(2).await.unwrap().is_none());
    }
}
