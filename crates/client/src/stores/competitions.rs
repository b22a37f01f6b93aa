//! Competition store: the latest snapshot per competition.
//!
//! Snapshots are complete rosters, so a new snapshot for a competition
//! replaces the stored one outright. Entries are never removed.

use indexmap::IndexMap;
use leaderboard_shared::{CompetitionSnapshot, Identifier};

/// Latest known snapshot per competition, in first-seen order.
///
/// Usage:
/// ```rust
/// use leaderboard_shared::CompetitionSnapshot;
/// use leaderboard_viewer::stores::CompetitionStore;
///
/// let mut store = CompetitionStore::new();
/// let previous = store.put(CompetitionSnapshot::new("weekly", vec![]));
/// assert!(previous.is_none());
/// assert_eq!(store.values().count(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompetitionStore {
    competitions: IndexMap<Identifier, CompetitionSnapshot>,
}

impl CompetitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, competition_id: &Identifier) -> Option<&CompetitionSnapshot> {
        self.competitions.get(competition_id)
    }

    /// Store `snapshot` under its competition id and hand back whatever it
    /// replaced. A replaced competition keeps its original position.
    pub fn put(&mut self, snapshot: CompetitionSnapshot) -> Option<CompetitionSnapshot> {
        self.competitions
            .insert(snapshot.competition_id.clone(), snapshot)
    }

    /// All snapshots, first-seen competition first.
    pub fn values(&self) -> impl Iterator<Item = &CompetitionSnapshot> {
        self.competitions.values()
    }

    pub fn len(&self) -> usize {
        self.competitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
    }
}
