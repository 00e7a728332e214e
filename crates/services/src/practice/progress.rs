/// Aggregated view of practice progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeProgress {
    pub total_items: usize,
    pub mastered: usize,
    pub remaining: usize,
    pub answered: usize,
    pub is_complete: bool,
}
