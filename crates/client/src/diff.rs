//! Change detection between consecutive snapshots of one competition.

use std::collections::HashMap;

use indexmap::IndexSet;
use leaderboard_shared::{CompetitionSnapshot, Identifier, Score};

/// Users whose score changed in one message, in roster order.
///
/// Membership is what matters; the order only decides which user is
/// reported by [`ChangeSet::last`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    user_ids: IndexSet<Identifier>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: &Identifier) -> bool {
        self.user_ids.contains(user_id)
    }

    /// The last changed user in roster order.
    pub fn last(&self) -> Option<&Identifier> {
        self.user_ids.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.user_ids.iter()
    }

    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }
}

impl FromIterator<Identifier> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
        Self {
            user_ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Identifier;
    type IntoIter = indexmap::set::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.user_ids.iter()
    }
}

/// Compute which users changed between `old` and `new`.
///
/// With no previous snapshot nothing is reported, since every row is being
/// drawn for the first time. Otherwise a user is reported when it is new or
/// its score differs by decimal value. Users that disappeared are not
/// reported.
pub fn diff(old: Option<&CompetitionSnapshot>, new: &CompetitionSnapshot) -> ChangeSet {
    let Some(old) = old else {
        return ChangeSet::new();
    };

    let previous: HashMap<&Identifier, &Score> =
        old.users.iter().map(|u| (&u.id, &u.score)).collect();

    new.users
        .iter()
        .filter(|user| previous.get(&user.id) != Some(&&user.score))
        .map(|user| user.id.clone())
        .collect()
}
