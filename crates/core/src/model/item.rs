use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("item prompt cannot be empty")]
    EmptyPrompt,

    #[error("item answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// Content kind of a learning item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Vocabulary,
    Grammar,
    Phrase,
}

//
// ─── PAYLOAD ───────────────────────────────────────────────────────────────────
//

/// Content handed to drill renderers.
///
/// The scheduler never looks inside; `examples` only matter for grammar items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub prompt: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// Unvalidated item as supplied by a catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemDraft {
    pub id: ItemId,
    pub kind: ItemKind,
    pub prompt: String,
    pub answer: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl ItemDraft {
    #[must_use]
    pub fn new(
        id: ItemId,
        kind: ItemKind,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            prompt: prompt.into(),
            answer: answer.into(),
            examples: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    /// Trim and validate the draft.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` if the prompt or answer is blank.
    pub fn validate(self) -> Result<LearningItem, ItemError> {
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(ItemError::EmptyPrompt);
        }
        let answer = self.answer.trim().to_owned();
        if answer.is_empty() {
            return Err(ItemError::EmptyAnswer);
        }
        let examples = self
            .examples
            .into_iter()
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty())
            .collect();

        Ok(LearningItem {
            id: self.id,
            kind: self.kind,
            payload: ItemPayload {
                prompt,
                answer,
                examples,
            },
        })
    }
}

/// One unit of content to practice. Immutable for the duration of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningItem {
    id: ItemId,
    kind: ItemKind,
    payload: ItemPayload,
}

impl LearningItem {
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    #[must_use]
    pub fn payload(&self) -> &ItemPayload {
        &self.payload
    }
}
