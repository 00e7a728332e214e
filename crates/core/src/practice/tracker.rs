use std::collections::HashMap;

use crate::model::{ItemId, MasteryRecord};

/// Read side of the external mastery tracker.
///
/// The scheduler only ever reads through this trait.
pub trait MasteryTracker {
    /// Returns the record for `item_id`, or `None` if the tracker has never seen it.
    fn get_mastery(&self, item_id: ItemId) -> Option<MasteryRecord>;

    /// Absent records count as not mastered.
    fn is_mastered(&self, item_id: ItemId) -> bool {
        self.get_mastery(item_id).is_some_and(|r| r.is_mastered)
    }
}

impl MasteryTracker for HashMap<ItemId, MasteryRecord> {
    fn get_mastery(&self, item_id: ItemId) -> Option<MasteryRecord> {
        self.get(&item_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_map_treats_missing_as_unmastered() {
        let mut snapshot = HashMap::new();
        snapshot.insert(ItemId::new(1), MasteryRecord::mastered());
        snapshot.insert(ItemId::new(2), MasteryRecord::default());

        assert!(snapshot.is_mastered(ItemId::new(1)));
        assert!(!snapshot.is_mastered(ItemId::new(2)));
        assert!(!snapshot.is_mastered(ItemId::new(3)));
        assert_eq!(snapshot.get_mastery(ItemId::new(3)), None);
    }
}
