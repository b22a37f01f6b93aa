//! Frame pipeline: decode, store, diff, render.

use leaderboard_shared::{decode_snapshot, CompetitionSnapshot, DecodeError};

use crate::diff::diff;
use crate::render::{Changed, RenderSink};
use crate::stores::CompetitionStore;

/// Owns the competition store and feeds the render sink.
///
/// Every decoded frame produces one store write and one render. A frame
/// that fails to decode leaves the store and the sink untouched.
pub struct Synchronizer<S> {
    store: CompetitionStore,
    sink: S,
}

impl<S: RenderSink> Synchronizer<S> {
    /// Create a synchronizer with an empty store and draw that empty state once.
    pub fn new(sink: S) -> Self {
        let mut sync = Self {
            store: CompetitionStore::new(),
            sink,
        };
        sync.render(None);
        sync
    }

    pub fn store(&self) -> &CompetitionStore {
        &self.store
    }

    /// Decode and apply one text frame.
    pub fn apply_frame(&mut self, frame: &str) -> Result<Option<Changed>, DecodeError> {
        let snapshot = decode_snapshot(frame)?;
        Ok(self.apply(snapshot))
    }

    /// Apply an already decoded snapshot. Returns the changed cells, if any.
    pub fn apply(&mut self, snapshot: CompetitionSnapshot) -> Option<Changed> {
        let competition_id = snapshot.competition_id.clone();
        let users = snapshot.users.len();

        let previous = self.store.put(snapshot);
        let changes = match self.store.get(&competition_id) {
            Some(current) => diff(previous.as_ref(), current),
            None => Default::default(),
        };

        tracing::debug!(
            competition_id = %competition_id,
            users,
            changed = changes.len(),
            "applied snapshot"
        );

        let changed = (!changes.is_empty()).then(|| Changed {
            competition_id,
            user_ids: changes,
        });
        self.render(changed.as_ref());
        changed
    }

    fn render(&mut self, changed: Option<&Changed>) {
        let snapshots: Vec<&CompetitionSnapshot> = self.store.values().collect();
        self.sink.render(&snapshots, changed);
    }
}
