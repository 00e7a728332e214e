use async_trait::async_trait;
use learn_core::model::{
    AnswerOutcome, ItemError, ItemId, LearningItem, MasteryPolicy, MasteryRecord,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    InvalidItem(#[from] ItemError),
}

/// Ordered source of the items practiced in a session. Read-only.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// List every item in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_items(&self) -> Result<Vec<LearningItem>, StorageError>;
}

/// Mastery tracker backing store: answer outcomes in, mastery records out.
#[async_trait]
pub trait MasteryStore: Send + Sync {
    /// Fetch the record for one item; `None` if it has never been answered.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_mastery(&self, id: ItemId) -> Result<Option<MasteryRecord>, StorageError>;

    /// Fetch records for `ids`. Items without a record are left out of the map.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn snapshot(
        &self,
        ids: &[ItemId],
    ) -> Result<HashMap<ItemId, MasteryRecord>, StorageError> {
        let mut records = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get_mastery(*id).await? {
                records.insert(*id, record);
            }
        }
        Ok(records)
    }

    /// Apply one answer outcome under `policy` and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn record_outcome(
        &self,
        id: ItemId,
        outcome: AnswerOutcome,
        policy: MasteryPolicy,
    ) -> Result<MasteryRecord, StorageError>;

    /// Overwrite the record for an item.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_mastery(&self, id: ItemId, record: MasteryRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<Mutex<Vec<LearningItem>>>,
    mastery: Arc<Mutex<HashMap<ItemId, MasteryRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_items(items: Vec<LearningItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
            mastery: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Replace an item with the same id, or append it to the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_item(&self, item: LearningItem) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => guard.push(item),
        }
        Ok(())
    }
}

#[async_trait]
impl ItemCatalog for InMemoryRepository {
    async fn list_items(&self) -> Result<Vec<LearningItem>, StorageError> {
        let guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl MasteryStore for InMemoryRepository {
    async fn get_mastery(&self, id: ItemId) -> Result<Option<MasteryRecord>, StorageError> {
        let guard = self
            .mastery
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).copied())
    }

    async fn snapshot(
        &self,
        ids: &[ItemId],
    ) -> Result<HashMap<ItemId, MasteryRecord>, StorageError> {
        let guard = self
            .mastery
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(ids
            .iter()
            .filter_map(|id| guard.get(id).map(|record| (*id, *record)))
            .collect())
    }

    async fn record_outcome(
        &self,
        id: ItemId,
        outcome: AnswerOutcome,
        policy: MasteryPolicy,
    ) -> Result<MasteryRecord, StorageError> {
        let mut guard = self
            .mastery
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let record = guard.entry(id).or_default();
        record.record(outcome, policy);
        Ok(*record)
    }

    async fn upsert_mastery(&self, id: ItemId, record: MasteryRecord) -> Result<(), StorageError> {
        let mut guard = self
            .mastery
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id, record);
        Ok(())
    }
}

/// Aggregates the catalog and mastery store behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn ItemCatalog>,
    pub mastery: Arc<dyn MasteryStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(items: Vec<LearningItem>) -> Self {
        let repo = InMemoryRepository::with_items(items);
        let catalog: Arc<dyn ItemCatalog> = Arc::new(repo.clone());
        let mastery: Arc<dyn MasteryStore> = Arc::new(repo);
        Self { catalog, mastery }
    }
}
