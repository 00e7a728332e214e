use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use std::fmt;

use learn_core::model::{
    AnswerLog, AnswerOutcome, ItemId, LearningItem, PracticeSummary, SessionId,
};
use learn_core::practice::{AdvanceOutcome, MasteryTracker, PracticeQueue, QueueEntry};

use tracing::warn;

use super::progress::PracticeProgress;
use crate::error::PracticeError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One running practice session.
///
/// Owns the queue handle plus everything the host needs around it: the items for
/// rendering, the answer log and the final summary. Driven by `PracticeLoopService`.
pub struct PracticeSession {
    id: SessionId,
    items: Vec<LearningItem>,
    queue: PracticeQueue<StdRng>,
    logs: Vec<AnswerLog>,
    awaiting_continue: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    summary: Option<PracticeSummary>,
}

impl PracticeSession {
    pub(crate) fn new(
        id: SessionId,
        items: Vec<LearningItem>,
        queue: PracticeQueue<StdRng>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let mut session = Self {
            id,
            items,
            queue,
            logs: Vec::new(),
            awaiting_continue: false,
            started_at,
            completed_at: None,
            summary: None,
        };
        if session.queue.is_complete() {
            session.finish(started_at);
        }
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Entry being presented, or `None` once the session has nothing left.
    #[must_use]
    pub fn current(&self) -> Option<QueueEntry> {
        self.queue.current()
    }

    /// Item behind the current entry, for rendering.
    #[must_use]
    pub fn current_item(&self) -> Option<&LearningItem> {
        let entry = self.current()?;
        self.item(entry.item_id)
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&LearningItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn queue(&self) -> &PracticeQueue<StdRng> {
        &self.queue
    }

    #[must_use]
    pub fn logs(&self) -> &[AnswerLog] {
        &self.logs
    }

    /// Summary built when the session completed.
    ///
    /// `None` while running, or if the log could not be summarized.
    #[must_use]
    pub fn summary(&self) -> Option<&PracticeSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        PracticeProgress {
            total_items: self.queue.catalog_len(),
            mastered: self.queue.retired_count(),
            remaining: self.queue.len(),
            answered: self.logs.len(),
            is_complete: self.is_complete(),
        }
    }

    /// Fail if the current entry was answered and not yet continued.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::AwaitingContinue` if the entry was already answered.
    pub(crate) fn ensure_can_answer(&self) -> Result<(), PracticeError> {
        if self.awaiting_continue {
            return Err(PracticeError::AwaitingContinue);
        }
        Ok(())
    }

    /// Record an answer for the current entry. Returns `None` on an empty queue.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::AwaitingContinue` if the entry was already answered.
    pub(crate) fn record_answer(
        &mut self,
        outcome: AnswerOutcome,
        answered_at: DateTime<Utc>,
    ) -> Result<Option<&AnswerLog>, PracticeError> {
        self.ensure_can_answer()?;
        let Some(entry) = self.queue.record_answer(outcome) else {
            return Ok(None);
        };
        self.awaiting_continue = true;
        self.logs.push(AnswerLog::new(
            entry.item_id,
            entry.drill_type,
            outcome,
            answered_at,
        ));
        Ok(self.logs.last())
    }

    /// Advance the queue against a mastery view and finish the session on the completion edge.
    pub(crate) fn advance<T: MasteryTracker + ?Sized>(
        &mut self,
        mastery: &T,
        now: DateTime<Utc>,
    ) -> AdvanceOutcome {
        let outcome = self.queue.advance(mastery);
        self.awaiting_continue = false;
        if outcome.completed {
            self.finish(now);
        }
        outcome
    }

    /// Mark the session complete. A clock that stepped backwards is clamped to the start.
    fn finish(&mut self, now: DateTime<Utc>) {
        let completed_at = now.max(self.started_at);
        self.completed_at = Some(completed_at);

        let mastered = u32::try_from(self.queue.retired_count()).unwrap_or(u32::MAX);
        match PracticeSummary::from_logs(self.started_at, completed_at, &self.logs, mastered) {
            Ok(summary) => self.summary = Some(summary),
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "session summary unavailable");
            }
        }
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("id", &self.id)
            .field("items_len", &self.items.len())
            .field("queue", &self.queue)
            .field("logs_len", &self.logs.len())
            .field("awaiting_continue", &self.awaiting_continue)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
