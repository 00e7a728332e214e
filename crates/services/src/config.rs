use learn_core::model::{PracticeSettings, PracticeSettingsDraft};

use crate::error::PracticeError;

/// Parse practice settings from a JSON document.
///
/// Every field is optional:
///
/// ```json
/// { "enabled_drill_types": ["fill-in-blank", "multiple-choice"], "mastery_streak": 3, "seed": 7 }
/// ```
///
/// # Errors
///
/// Returns `PracticeError::Config` for malformed JSON and `PracticeError::Settings` when
/// the values do not validate.
pub fn settings_from_json(json: &str) -> Result<PracticeSettings, PracticeError> {
    let draft: PracticeSettingsDraft = serde_json::from_str(json)?;
    Ok(draft.validate()?)
}
