pub mod json_file;
pub mod memory;
pub mod seed;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::models::{Asset, JournalEntry, JournalEntryPatch, Operation, OperationPatch};

/// Owner of the operation list. Lists come back newest first.
#[async_trait]
pub trait OperationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Operation>>;
    async fn get(&self, id: u64) -> Result<Option<Operation>>;
    async fn add(&self, operation: Operation) -> Result<Operation>;
    async fn update(&self, id: u64, patch: OperationPatch) -> Result<Operation>;
    async fn delete(&self, id: u64) -> Result<Operation>;
    /// Store a batch, assigning fresh ids to every record.
    async fn import(&self, operations: Vec<Operation>) -> Result<Vec<Operation>>;
    async fn assets(&self) -> Result<Vec<Asset>>;
}

#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn list_entries(&self) -> Result<Vec<JournalEntry>>;
    async fn entry_for_operation(&self, operation_id: u64) -> Result<Option<JournalEntry>>;
    async fn add_entry(&self, entry: JournalEntry) -> Result<JournalEntry>;
    async fn update_entry(&self, id: u64, patch: JournalEntryPatch) -> Result<JournalEntry>;
    async fn delete_entry(&self, id: u64) -> Result<JournalEntry>;
}

/// Everything a store holds. This is also the persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    pub last_updated: DateTime<Utc>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
            journal_entries: Vec::new(),
            assets: seed::sample_assets(),
            last_updated: Utc::now(),
        }
    }
}

impl StoreState {
    pub fn seeded() -> Self {
        Self {
            operations: seed::sample_operations(),
            journal_entries: seed::sample_journal_entries(),
            ..Default::default()
        }
    }

    fn next_operation_id(&self) -> u64 {
        self.operations.iter().filter_map(|o| o.id).max().unwrap_or(0) + 1
    }

    fn next_entry_id(&self) -> u64 {
        self.journal_entries
            .iter()
            .filter_map(|e| e.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }

    pub fn add_operation(
        &mut self,
        mut operation: Operation,
        now: DateTime<Utc>,
    ) -> Result<Operation, JournalError> {
        operation.validate()?;
        match operation.id {
            Some(id) if self.operations.iter().any(|o| o.id == Some(id)) => {
                return Err(JournalError::DuplicateOperationId(id));
            }
            Some(_) => {}
            None => operation.id = Some(self.next_operation_id()),
        }
        operation.created_at.get_or_insert(now);
        self.operations.insert(0, operation.clone());
        self.touch(now);
        Ok(operation)
    }

    /// The patched record must still validate; on failure nothing changes.
    pub fn update_operation(
        &mut self,
        id: u64,
        patch: &OperationPatch,
        now: DateTime<Utc>,
    ) -> Result<Operation, JournalError> {
        let slot = self
            .operations
            .iter_mut()
            .find(|o| o.id == Some(id))
            .ok_or(JournalError::OperationNotFound(id))?;
        let mut updated = slot.clone();
        updated.apply(patch);
        updated.validate()?;
        *slot = updated.clone();
        self.touch(now);
        Ok(updated)
    }

    /// Journal entries that point at the removed operation are left alone.
    pub fn delete_operation(
        &mut self,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<Operation, JournalError> {
        let pos = self
            .operations
            .iter()
            .position(|o| o.id == Some(id))
            .ok_or(JournalError::OperationNotFound(id))?;
        let removed = self.operations.remove(pos);
        self.touch(now);
        Ok(removed)
    }

    /// All-or-nothing: one invalid record rejects the batch.
    pub fn import_operations(
        &mut self,
        operations: Vec<Operation>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Operation>, JournalError> {
        for op in &operations {
            op.validate()?;
        }
        let mut next_id = self.next_operation_id();
        let imported: Vec<Operation> = operations
            .into_iter()
            .map(|mut op| {
                op.id = Some(next_id);
                next_id += 1;
                op.created_at.get_or_insert(now);
                op
            })
            .collect();

        self.operations.splice(0..0, imported.iter().cloned());
        self.touch(now);
        Ok(imported)
    }

    pub fn add_entry(
        &mut self,
        mut entry: JournalEntry,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry, JournalError> {
        match entry.id {
            Some(id) if self.journal_entries.iter().any(|e| e.id == Some(id)) => {
                return Err(JournalError::DuplicateEntryId(id));
            }
            Some(_) => {}
            None => entry.id = Some(self.next_entry_id()),
        }
        entry.created_at.get_or_insert(now);
        self.journal_entries.insert(0, entry.clone());
        self.touch(now);
        Ok(entry)
    }

    pub fn update_entry(
        &mut self,
        id: u64,
        patch: &JournalEntryPatch,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry, JournalError> {
        let entry = self
            .journal_entries
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or(JournalError::EntryNotFound(id))?;
        entry.apply(patch);
        let updated = entry.clone();
        self.touch(now);
        Ok(updated)
    }

    pub fn delete_entry(
        &mut self,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry, JournalError> {
        let pos = self
            .journal_entries
            .iter()
            .position(|e| e.id == Some(id))
            .ok_or(JournalError::EntryNotFound(id))?;
        let removed = self.journal_entries.remove(pos);
        self.touch(now);
        Ok(removed)
    }

    pub fn entry_for_operation(&self, operation_id: u64) -> Option<&JournalEntry> {
        self.journal_entries
            .iter()
            .find(|e| e.operation_id == operation_id)
    }
}
