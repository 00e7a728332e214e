use std::fmt;

use tracing::info;

use crate::model::ItemId;
use crate::practice::MasteryTracker;

/// Callback raised once when a session becomes complete.
pub type CompletionObserver = Box<dyn FnMut() + Send>;

/// True when every catalog item is mastered according to `mastery`.
///
/// Recomputed on demand; a linear scan over the catalog.
pub fn is_session_complete<I, T>(items: I, mastery: &T) -> bool
where
    I: IntoIterator<Item = ItemId>,
    T: MasteryTracker + ?Sized,
{
    items.into_iter().all(|id| mastery.is_mastered(id))
}

/// Edge-triggered completion signal.
///
/// Fires on the first false-to-true transition only; later evaluations are silent.
#[derive(Default)]
pub struct CompletionDetector {
    fired: bool,
    observer: Option<CompletionObserver>,
}

impl CompletionDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_observer(observer: CompletionObserver) -> Self {
        Self {
            fired: false,
            observer: Some(observer),
        }
    }

    /// Feed the current completion state. Returns true only on the rising edge.
    pub fn evaluate(&mut self, complete: bool) -> bool {
        if !complete || self.fired {
            return false;
        }
        self.fired = true;
        info!("practice session complete");
        if let Some(observer) = self.observer.as_mut() {
            observer();
        }
        true
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl fmt::Debug for CompletionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionDetector")
            .field("fired", &self.fired)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
