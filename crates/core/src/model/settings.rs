use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DrillType, MasteryPolicy};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("at least one drill type must be enabled")]
    NoDrillTypes,

    #[error("mastery streak must be > 0")]
    InvalidMasteryStreak,
}

/// Validated configuration for practice sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeSettings {
    enabled_drill_types: Vec<DrillType>,
    mastery_policy: MasteryPolicy,
    seed: Option<u64>,
}

/// Raw settings as read from a config source; missing fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PracticeSettingsDraft {
    pub enabled_drill_types: Option<Vec<DrillType>>,
    pub mastery_streak: Option<u32>,
    pub seed: Option<u64>,
}

impl PracticeSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// Duplicate drill types are dropped, keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if no drill types are enabled or the streak is zero.
    pub fn validate(self) -> Result<PracticeSettings, SettingsError> {
        let requested = self
            .enabled_drill_types
            .unwrap_or_else(|| DrillType::ALL.to_vec());
        let mut enabled_drill_types = Vec::with_capacity(requested.len());
        for drill in requested {
            if !enabled_drill_types.contains(&drill) {
                enabled_drill_types.push(drill);
            }
        }
        if enabled_drill_types.is_empty() {
            return Err(SettingsError::NoDrillTypes);
        }

        let mastery_policy = match self.mastery_streak {
            Some(streak) => MasteryPolicy::new(streak).ok_or(SettingsError::InvalidMasteryStreak)?,
            None => MasteryPolicy::default(),
        };

        Ok(PracticeSettings {
            enabled_drill_types,
            mastery_policy,
            seed: self.seed,
        })
    }
}

impl PracticeSettings {
    #[must_use]
    pub fn enabled_drill_types(&self) -> &[DrillType] {
        &self.enabled_drill_types
    }

    #[must_use]
    pub fn mastery_policy(&self) -> MasteryPolicy {
        self.mastery_policy
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            enabled_drill_types: DrillType::ALL.to_vec(),
            mastery_policy: MasteryPolicy::default(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_takes_defaults() {
        let settings = PracticeSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, PracticeSettings::default());
        assert_eq!(settings.enabled_drill_types().len(), 5);
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let settings = PracticeSettingsDraft {
            enabled_drill_types: Some(vec![
                DrillType::MultipleChoice,
                DrillType::FillInBlank,
                DrillType::MultipleChoice,
            ]),
            ..PracticeSettingsDraft::default()
        }
        .validate()
        .unwrap();

        assert_eq!(
            settings.enabled_drill_types(),
            &[DrillType::MultipleChoice, DrillType::FillInBlank]
        );
    }

    #[test]
    fn invalid_drafts_are_rejected() {
        let err = PracticeSettingsDraft {
            enabled_drill_types: Some(Vec::new()),
            ..PracticeSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, SettingsError::NoDrillTypes);

        let err = PracticeSettingsDraft {
            mastery_streak: Some(0),
            ..PracticeSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, SettingsError::InvalidMasteryStreak);
    }
}
