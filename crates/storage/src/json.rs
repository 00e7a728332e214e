//! Read-only item catalog backed by a JSON document.
//!
//! The document is an array of items:
//!
//! ```json
//! [
//!   { "id": 1, "kind": "vocabulary", "prompt": "el perro", "answer": "the dog" },
//!   { "id": 2, "kind": "grammar", "prompt": "ser vs estar", "answer": "estar",
//!     "examples": ["Estoy cansado."] }
//! ]
//! ```

use async_trait::async_trait;
use learn_core::model::{ItemDraft, LearningItem};
use tracing::debug;

use crate::repository::{ItemCatalog, StorageError};

#[derive(Debug, Clone)]
pub struct JsonCatalog {
    items: Vec<LearningItem>,
}

impl JsonCatalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON and
    /// `StorageError::InvalidItem` if any item fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        let drafts: Vec<ItemDraft> =
            serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let items = drafts
            .into_iter()
            .map(ItemDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = items.len(), "loaded json catalog");
        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[LearningItem] {
        &self.items
    }
}

#[async_trait]
impl ItemCatalog for JsonCatalog {
    async fn list_items(&self) -> Result<Vec<LearningItem>, StorageError> {
        Ok(self.items.clone())
    }
}
