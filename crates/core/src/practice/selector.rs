use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::{DrillType, ItemKind};
use crate::practice::{ConfigurationError, RecencyWindow};

/// How many of the newest recency entries are excluded from the next pick.
///
/// Deliberately smaller than [`crate::practice::RECENCY_CAPACITY`]: a type used three
/// selections ago is eligible again.
pub const VARIETY_EXCLUSION: usize = 2;

/// Deterministic part of drill selection: the candidate set a pick is drawn from.
///
/// Candidates keep the order of `enabled`. Returns an empty vec only when `enabled` is empty.
#[must_use]
pub fn candidate_drill_types(
    kind: ItemKind,
    enabled: &[DrillType],
    recent: &RecencyWindow,
) -> Vec<DrillType> {
    let excluded: Vec<DrillType> = recent.most_recent(VARIETY_EXCLUSION).collect();
    let mut candidates: Vec<DrillType> = enabled
        .iter()
        .copied()
        .filter(|drill| !excluded.contains(drill))
        .collect();
    if candidates.is_empty() {
        candidates = enabled.to_vec();
    }

    if kind == ItemKind::Grammar {
        let structured: Vec<DrillType> = candidates
            .iter()
            .copied()
            .filter(|drill| drill.is_structured())
            .collect();
        if !structured.is_empty() {
            candidates = structured;
        }
    }

    candidates
}

/// Pick a drill type for an item of `kind`, uniformly among the candidates.
///
/// # Errors
///
/// Returns `ConfigurationError::NoDrillTypes` if `enabled` is empty.
pub fn select_drill_type<R: Rng + ?Sized>(
    kind: ItemKind,
    enabled: &[DrillType],
    recent: &RecencyWindow,
    rng: &mut R,
) -> Result<DrillType, ConfigurationError> {
    candidate_drill_types(kind, enabled, recent)
        .choose(rng)
        .copied()
        .ok_or(ConfigurationError::NoDrillTypes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn window(drills: &[DrillType]) -> RecencyWindow {
        let mut window = RecencyWindow::new();
        for drill in drills {
            window.push(*drill);
        }
        window
    }

    #[test]
    fn empty_enabled_set_is_a_configuration_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_drill_type(ItemKind::Vocabulary, &[], &RecencyWindow::new(), &mut rng)
            .unwrap_err();
        assert_eq!(err, ConfigurationError::NoDrillTypes);
    }

    #[test]
    fn only_the_two_newest_entries_are_excluded() {
        let recent = window(&[
            DrillType::FillInBlank,
            DrillType::MultipleChoice,
            DrillType::TranslateToSource,
        ]);
        let enabled = [
            DrillType::FillInBlank,
            DrillType::MultipleChoice,
            DrillType::TranslateToSource,
        ];

        let candidates = candidate_drill_types(ItemKind::Vocabulary, &enabled, &recent);

        assert_eq!(candidates, vec![DrillType::FillInBlank]);
    }

    #[test]
    fn exhausted_filter_falls_back_to_enabled_set() {
        let recent = window(&[DrillType::MultipleChoice, DrillType::FillInBlank]);
        let enabled = [DrillType::FillInBlank, DrillType::MultipleChoice];

        let candidates = candidate_drill_types(ItemKind::Phrase, &enabled, &recent);

        assert_eq!(candidates, enabled.to_vec());
    }

    #[test]
    fn grammar_prefers_structured_drills() {
        let enabled = DrillType::ALL;
        let candidates = candidate_drill_types(ItemKind::Grammar, &enabled, &RecencyWindow::new());
        assert_eq!(
            candidates,
            vec![
                DrillType::TranslateToTarget,
                DrillType::FillInBlank,
                DrillType::MultipleChoice,
            ]
        );

        let vocab = candidate_drill_types(ItemKind::Vocabulary, &enabled, &RecencyWindow::new());
        assert_eq!(vocab, enabled.to_vec());
    }

    #[test]
    fn grammar_affinity_never_empties_the_set() {
        let enabled = [DrillType::ListeningIdentification, DrillType::TranslateToSource];
        let candidates = candidate_drill_types(ItemKind::Grammar, &enabled, &RecencyWindow::new());
        assert_eq!(candidates, enabled.to_vec());
    }

    #[test]
    fn grammar_affinity_applies_after_the_variety_filter() {
        let recent = window(&[DrillType::FillInBlank, DrillType::MultipleChoice]);
        let enabled = [
            DrillType::FillInBlank,
            DrillType::MultipleChoice,
            DrillType::ListeningIdentification,
        ];

        let candidates = candidate_drill_types(ItemKind::Grammar, &enabled, &recent);

        assert_eq!(candidates, vec![DrillType::ListeningIdentification]);
    }

    #[test]
    fn single_enabled_type_is_always_picked() {
        let mut rng = StdRng::seed_from_u64(7);
        let recent = window(&[DrillType::MultipleChoice, DrillType::MultipleChoice]);
        for _ in 0..20 {
            let picked = select_drill_type(
                ItemKind::Vocabulary,
                &[DrillType::MultipleChoice],
                &recent,
                &mut rng,
            )
            .unwrap();
            assert_eq!(picked, DrillType::MultipleChoice);
        }
    }

    #[test]
    fn picks_stay_within_candidates_and_replay_with_same_seed() {
        let recent = window(&[DrillType::TranslateToTarget]);
        let pick_all = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| {
                    select_drill_type(ItemKind::Vocabulary, &DrillType::ALL, &recent, &mut rng)
                        .unwrap()
                })
                .collect::<Vec<_>>()
        };

        let first = pick_all(42);
        assert!(first.iter().all(|d| *d != DrillType::TranslateToTarget));
        assert_eq!(first, pick_all(42));
    }
}
