use serde::{Deserialize, Serialize};

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Result of a single answer as reported by the drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

impl AnswerOutcome {
    #[must_use]
    pub fn from_correct(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Rule deciding when an item counts as mastered.
///
/// An item is mastered after `required_streak` consecutive correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryPolicy {
    required_streak: u32,
}

impl MasteryPolicy {
    pub const DEFAULT_STREAK: u32 = 2;

    /// Returns `None` for a zero streak, which would master items without an answer.
    #[must_use]
    pub fn new(required_streak: u32) -> Option<Self> {
        (required_streak > 0).then_some(Self { required_streak })
    }

    #[must_use]
    pub fn required_streak(&self) -> u32 {
        self.required_streak
    }
}

impl Default for MasteryPolicy {
    fn default() -> Self {
        Self {
            required_streak: Self::DEFAULT_STREAK,
        }
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// Per-item mastery counters, owned by the mastery tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub correct_count: u32,
    pub incorrect_count: u32,
    #[serde(default)]
    pub streak: u32,
    pub is_mastered: bool,
}

impl MasteryRecord {
    /// A record for an item that is already mastered.
    #[must_use]
    pub fn mastered() -> Self {
        Self {
            is_mastered: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.correct_count.saturating_add(self.incorrect_count)
    }

    /// Apply one answer. Once mastered, the record stays mastered.
    pub fn record(&mut self, outcome: AnswerOutcome, policy: MasteryPolicy) {
        match outcome {
            AnswerOutcome::Correct => {
                self.correct_count = self.correct_count.saturating_add(1);
                self.streak = self.streak.saturating_add(1);
            }
            AnswerOutcome::Incorrect => {
                self.incorrect_count = self.incorrect_count.saturating_add(1);
                self.streak = 0;
            }
        }
        if self.streak >= policy.required_streak() {
            self.is_mastered = true;
        }
    }
}
