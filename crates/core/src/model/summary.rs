use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::model::{AnswerOutcome, DrillType, ItemId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many answers for a single session: {len}")]
    TooManyLogs { len: usize },
}

/// Record of one answered queue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLog {
    pub item_id: ItemId,
    pub drill_type: DrillType,
    pub outcome: AnswerOutcome,
    pub answered_at: DateTime<Utc>,
}

impl AnswerLog {
    #[must_use]
    pub fn new(
        item_id: ItemId,
        drill_type: DrillType,
        outcome: AnswerOutcome,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            drill_type,
            outcome,
            answered_at,
        }
    }
}

/// Aggregate summary for a finished practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total_answers: u32,
    correct: u32,
    incorrect: u32,
    items_practiced: u32,
    items_mastered: u32,
    by_drill_type: BTreeMap<DrillType, u32>,
}

impl PracticeSummary {
    /// Build a summary from the session's answer logs.
    ///
    /// `items_mastered` is supplied by the caller since it comes from the mastery tracker.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SummaryError::TooManyLogs` if the log count cannot fit in `u32`.
    pub fn from_logs(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        logs: &[AnswerLog],
        items_mastered: u32,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        let total_answers =
            u32::try_from(logs.len()).map_err(|_| SummaryError::TooManyLogs { len: logs.len() })?;

        let mut correct = 0_u32;
        let mut by_drill_type = BTreeMap::new();
        let mut practiced = BTreeSet::new();
        for log in logs {
            if log.outcome.is_correct() {
                correct = correct.saturating_add(1);
            }
            *by_drill_type.entry(log.drill_type).or_insert(0_u32) += 1;
            practiced.insert(log.item_id);
        }
        // Bounded by total_answers.
        let items_practiced = u32::try_from(practiced.len()).unwrap_or(total_answers);

        Ok(Self {
            started_at,
            completed_at,
            total_answers,
            correct,
            incorrect: total_answers - correct,
            items_practiced,
            items_mastered,
            by_drill_type,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total_answers(&self) -> u32 {
        self.total_answers
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn items_practiced(&self) -> u32 {
        self.items_practiced
    }

    #[must_use]
    pub fn items_mastered(&self) -> u32 {
        self.items_mastered
    }

    /// Answers per drill type; types never used are absent.
    #[must_use]
    pub fn by_drill_type(&self) -> &BTreeMap<DrillType, u32> {
        &self.by_drill_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_counts_outcomes_and_drill_types() {
        let now = fixed_now();
        let logs = vec![
            AnswerLog::new(ItemId::new(1), DrillType::FillInBlank, AnswerOutcome::Incorrect, now),
            AnswerLog::new(ItemId::new(2), DrillType::MultipleChoice, AnswerOutcome::Correct, now),
            AnswerLog::new(ItemId::new(1), DrillType::MultipleChoice, AnswerOutcome::Correct, now),
        ];

        let summary = PracticeSummary::from_logs(now, now, &logs, 2).unwrap();

        assert_eq!(summary.total_answers(), 3);
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.items_practiced(), 2);
        assert_eq!(summary.items_mastered(), 2);
        assert_eq!(summary.by_drill_type().get(&DrillType::MultipleChoice), Some(&2));
        assert_eq!(summary.by_drill_type().get(&DrillType::TranslateToSource), None);
    }

    #[test]
    fn backwards_time_range_is_rejected() {
        let now = fixed_now();
        let err = PracticeSummary::from_logs(now, now - chrono::Duration::seconds(1), &[], 0)
            .unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);
    }
}
