use rand::Rng;
use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::model::{AnswerOutcome, DrillType, ItemId, ItemKind, LearningItem, MasteryRecord};
use crate::practice::{
    CompletionDetector, CompletionObserver, ConfigurationError, MasteryTracker, RecencyWindow,
    is_session_complete, select_drill_type,
};

//
// ─── ENTRIES ───────────────────────────────────────────────────────────────────
//

/// One scheduled occurrence of an item with the drill type it will be shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    pub item_id: ItemId,
    pub drill_type: DrillType,
}

/// What a continue event did to the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// The presented entry left the queue because its item is mastered.
    pub removed: bool,
    /// The session became complete on this event (fires once per session).
    pub completed: bool,
}

//
// ─── MONOTONIC VIEW ────────────────────────────────────────────────────────────
//

/// Mastery as the scheduler sees it: once an item is retired it stays mastered,
/// whatever the tracker reports later.
struct MonotonicView<'a, T: ?Sized> {
    retired: &'a HashSet<ItemId>,
    inner: &'a T,
}

impl<T: MasteryTracker + ?Sized> MasteryTracker for MonotonicView<'_, T> {
    fn get_mastery(&self, item_id: ItemId) -> Option<MasteryRecord> {
        let record = self.inner.get_mastery(item_id);
        if self.retired.contains(&item_id) {
            return Some(MasteryRecord {
                is_mastered: true,
                ..record.unwrap_or_default()
            });
        }
        record
    }
}

//
// ─── QUEUE ─────────────────────────────────────────────────────────────────────
//

/// Retry queue driving one practice session.
///
/// Holds one entry per unmastered item plus a cursor at the presented entry. The host
/// drives it with `record_answer` / `advance` pairs: mastered items leave the queue,
/// everything else goes to the back with a freshly selected drill type.
pub struct PracticeQueue<R> {
    catalog: Vec<(ItemId, ItemKind)>,
    enabled: Vec<DrillType>,
    entries: Vec<QueueEntry>,
    cursor: usize,
    recent: RecencyWindow,
    retired: HashSet<ItemId>,
    completion: CompletionDetector,
    rng: R,
}

impl<R: Rng> PracticeQueue<R> {
    /// Build the queue from the catalog and a mastery snapshot.
    ///
    /// Items already mastered are never enqueued. If that leaves nothing to practice the
    /// session starts complete.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `enabled` or `items` is empty.
    pub fn initialize<T: MasteryTracker + ?Sized>(
        items: &[LearningItem],
        mastery: &T,
        enabled: &[DrillType],
        rng: R,
    ) -> Result<Self, ConfigurationError> {
        Self::initialize_with_observer(items, mastery, enabled, rng, None)
    }

    /// Like [`PracticeQueue::initialize`], registering a completion callback first so it
    /// also fires for a session that starts complete.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `enabled` or `items` is empty.
    pub fn initialize_with_observer<T: MasteryTracker + ?Sized>(
        items: &[LearningItem],
        mastery: &T,
        enabled: &[DrillType],
        rng: R,
        observer: Option<CompletionObserver>,
    ) -> Result<Self, ConfigurationError> {
        if enabled.is_empty() {
            return Err(ConfigurationError::NoDrillTypes);
        }
        if items.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let completion = match observer {
            Some(observer) => CompletionDetector::with_observer(observer),
            None => CompletionDetector::new(),
        };
        let mut queue = Self {
            catalog: Vec::with_capacity(items.len()),
            enabled: enabled.to_vec(),
            entries: Vec::with_capacity(items.len()),
            cursor: 0,
            recent: RecencyWindow::new(),
            retired: HashSet::new(),
            completion,
            rng,
        };

        for item in items {
            let id = item.id();
            if queue.catalog.iter().any(|(seen, _)| *seen == id) {
                warn!(item = %id, "duplicate item in catalog, ignoring");
                continue;
            }
            queue.catalog.push((id, item.kind()));

            if mastery.is_mastered(id) {
                queue.retired.insert(id);
                continue;
            }
            let drill_type = queue.select(item.kind())?;
            queue.entries.push(QueueEntry {
                item_id: id,
                drill_type,
            });
            debug!(item = %id, drill = %drill_type, "enqueued item");
        }

        queue.reconcile_completion(mastery);
        Ok(queue)
    }

    /// Entry awaiting an answer, or `None` once nothing is left to practice.
    #[must_use]
    pub fn current(&self) -> Option<QueueEntry> {
        self.entries.get(self.cursor).copied()
    }

    /// Note that the presented entry was answered.
    ///
    /// The outcome itself belongs to the mastery tracker; the queue only records the drill
    /// type for variety. No-op on an empty queue.
    pub fn record_answer(&mut self, outcome: AnswerOutcome) -> Option<QueueEntry> {
        let entry = self.current()?;
        self.recent.push(entry.drill_type);
        debug!(
            item = %entry.item_id,
            drill = %entry.drill_type,
            correct = outcome.is_correct(),
            "answer recorded"
        );
        Some(entry)
    }

    /// Move past the presented entry, re-reading its mastery.
    ///
    /// Mastered items are removed; others are requeued at the back with a new drill type.
    /// No-op on an empty queue, so it is safe to call after completion.
    pub fn advance<T: MasteryTracker + ?Sized>(&mut self, mastery: &T) -> AdvanceOutcome {
        let Some(entry) = self.current() else {
            return AdvanceOutcome::default();
        };
        let id = entry.item_id;

        let mastered = self.retired.contains(&id)
            || match mastery.get_mastery(id) {
                Some(record) => record.is_mastered,
                None => {
                    warn!(item = %id, "no mastery record for presented item, requeueing");
                    false
                }
            };

        self.entries.remove(self.cursor);
        if mastered {
            self.retired.insert(id);
            debug!(item = %id, remaining = self.entries.len(), "item mastered, removed");
        } else {
            let kind = self.kind_of(id);
            let drill_type = self.select(kind).unwrap_or(entry.drill_type);
            self.entries.push(QueueEntry {
                item_id: id,
                drill_type,
            });
            debug!(item = %id, drill = %drill_type, "item requeued");
        }

        if self.cursor >= self.entries.len() {
            self.cursor = 0;
        }

        AdvanceOutcome {
            removed: mastered,
            completed: self.reconcile_completion(mastery),
        }
    }

    fn select(&mut self, kind: ItemKind) -> Result<DrillType, ConfigurationError> {
        let drill_type = select_drill_type(kind, &self.enabled, &self.recent, &mut self.rng)?;
        self.recent.push(drill_type);
        Ok(drill_type)
    }
}

impl<R> PracticeQueue<R> {
    /// Evaluate completion; returns true on the rising edge.
    ///
    /// Once complete, any entries still queued belong to items mastered away from the
    /// cursor, so they are dropped.
    fn reconcile_completion<T: MasteryTracker + ?Sized>(&mut self, mastery: &T) -> bool {
        let complete = {
            let view = MonotonicView {
                retired: &self.retired,
                inner: mastery,
            };
            is_session_complete(self.catalog.iter().map(|(id, _)| *id), &view)
        };
        if complete && !self.entries.is_empty() {
            self.retired.extend(self.entries.iter().map(|e| e.item_id));
            self.entries.clear();
            self.cursor = 0;
        }
        self.completion.evaluate(complete)
    }

    fn kind_of(&self, id: ItemId) -> ItemKind {
        self.catalog
            .iter()
            .find(|(seen, _)| *seen == id)
            .map_or(ItemKind::Vocabulary, |(_, kind)| *kind)
    }

    #[must_use]
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of distinct items in the session catalog.
    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.catalog.iter().map(|(id, _)| *id).collect()
    }

    /// Items that left the queue (or never entered it) as mastered.
    #[must_use]
    pub fn retired_count(&self) -> usize {
        self.retired.len()
    }

    #[must_use]
    pub fn is_retired(&self, id: ItemId) -> bool {
        self.retired.contains(&id)
    }

    #[must_use]
    pub fn recent_drill_types(&self) -> &RecencyWindow {
        &self.recent
    }

    #[must_use]
    pub fn enabled_drill_types(&self) -> &[DrillType] {
        &self.enabled
    }

    /// Whether the completion signal has fired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.has_fired()
    }
}

impl<R> fmt::Debug for PracticeQueue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeQueue")
            .field("catalog_len", &self.catalog.len())
            .field("entries", &self.entries)
            .field("cursor", &self.cursor)
            .field("recent", &self.recent)
            .field("retired_len", &self.retired.len())
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
