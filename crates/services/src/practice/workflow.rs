use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use learn_core::model::{AnswerLog, AnswerOutcome, PracticeSettings, SessionId};
use learn_core::practice::{AdvanceOutcome, CompletionObserver, PracticeQueue};
use storage::repository::{ItemCatalog, MasteryStore};
use tracing::{debug, info};

use super::session::PracticeSession;
use crate::Clock;
use crate::error::PracticeError;

/// Orchestrates practice sessions over a catalog and a mastery store.
///
/// Storage is read and written here; the queue itself only ever sees mastery snapshots.
#[derive(Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    catalog: Arc<dyn ItemCatalog>,
    mastery: Arc<dyn MasteryStore>,
    settings: PracticeSettings,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<dyn ItemCatalog>,
        mastery: Arc<dyn MasteryStore>,
    ) -> Self {
        Self {
            clock,
            catalog,
            mastery,
            settings: PracticeSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PracticeSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    /// Start a new session over the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Configuration` for an empty catalog and
    /// `PracticeError::Storage` if the catalog or mastery store cannot be read.
    pub async fn start_session(&self) -> Result<PracticeSession, PracticeError> {
        self.start(None).await
    }

    /// Start a new session, calling `observer` once when it completes.
    ///
    /// The observer runs before this returns if every item is already mastered.
    ///
    /// # Errors
    ///
    /// Same as [`PracticeLoopService::start_session`].
    pub async fn start_session_with_observer(
        &self,
        observer: CompletionObserver,
    ) -> Result<PracticeSession, PracticeError> {
        self.start(Some(observer)).await
    }

    async fn start(
        &self,
        observer: Option<CompletionObserver>,
    ) -> Result<PracticeSession, PracticeError> {
        let id = SessionId::generate();
        let items = self.catalog.list_items().await?;
        let ids: Vec<_> = items.iter().map(|item| item.id()).collect();
        let snapshot = self.mastery.snapshot(&ids).await?;

        let queue = PracticeQueue::initialize_with_observer(
            &items,
            &snapshot,
            self.settings.enabled_drill_types(),
            self.session_rng(),
            observer,
        )?;
        info!(
            session_id = %id,
            items = items.len(),
            queued = queue.len(),
            "practice session started"
        );

        Ok(PracticeSession::new(id, items, queue, self.clock.now()))
    }

    /// Record the outcome for the current entry in the mastery store and the session.
    ///
    /// Returns `Ok(None)` without touching storage when the session has nothing left.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::AwaitingContinue` if the entry was already answered, or
    /// `PracticeError::Storage` if the outcome cannot be stored.
    #[tracing::instrument(skip_all, fields(session_id = %session.id()))]
    pub async fn answer_current(
        &self,
        session: &mut PracticeSession,
        outcome: AnswerOutcome,
    ) -> Result<Option<AnswerLog>, PracticeError> {
        let Some(entry) = session.current() else {
            return Ok(None);
        };
        session.ensure_can_answer()?;
        let record = self
            .mastery
            .record_outcome(entry.item_id, outcome, self.settings.mastery_policy())
            .await?;
        debug!(
            item = %entry.item_id,
            mastered = record.is_mastered,
            attempts = record.attempts(),
            "mastery updated"
        );
        // Logged only once the store has the outcome, so a failed write can be retried.
        Ok(session.record_answer(outcome, self.clock.now())?.cloned())
    }

    /// Move past the current entry, re-reading mastery from the store.
    ///
    /// Safe to call on a completed session; it reports nothing removed or completed.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if mastery cannot be read.
    #[tracing::instrument(skip_all, fields(session_id = %session.id()))]
    pub async fn continue_current(
        &self,
        session: &mut PracticeSession,
    ) -> Result<AdvanceOutcome, PracticeError> {
        if session.current().is_none() {
            return Ok(AdvanceOutcome::default());
        }
        let snapshot = self.mastery.snapshot(&session.queue().item_ids()).await?;
        let outcome = session.advance(&snapshot, self.clock.now());
        if outcome.completed {
            info!(
                answers = session.logs().len(),
                items = session.queue().catalog_len(),
                "practice session finished"
            );
        }
        Ok(outcome)
    }

    fn session_rng(&self) -> StdRng {
        match self.settings.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
