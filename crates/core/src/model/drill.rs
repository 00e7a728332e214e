use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown drill type: {0}")]
pub struct UnknownDrillType(pub String);

/// Question style used to present an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrillType {
    TranslateToTarget,
    TranslateToSource,
    FillInBlank,
    ListeningIdentification,
    MultipleChoice,
}

impl DrillType {
    pub const ALL: [DrillType; 5] = [
        DrillType::TranslateToTarget,
        DrillType::TranslateToSource,
        DrillType::FillInBlank,
        DrillType::ListeningIdentification,
        DrillType::MultipleChoice,
    ];

    /// Drill types preferred for grammar content.
    pub const STRUCTURED: [DrillType; 3] = [
        DrillType::FillInBlank,
        DrillType::MultipleChoice,
        DrillType::TranslateToTarget,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DrillType::TranslateToTarget => "translate-to-target",
            DrillType::TranslateToSource => "translate-to-source",
            DrillType::FillInBlank => "fill-in-blank",
            DrillType::ListeningIdentification => "listening-identification",
            DrillType::MultipleChoice => "multiple-choice",
        }
    }

    #[must_use]
    pub fn is_structured(self) -> bool {
        Self::STRUCTURED.contains(&self)
    }
}

impl fmt::Display for DrillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrillType {
    type Err = UnknownDrillType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDrillType(s.to_owned()))
    }
}
