//! Render sink interface and a plain-text terminal sink.

use std::io::{self, Write};

use leaderboard_shared::{CompetitionSnapshot, Identifier};
use rust_decimal::RoundingStrategy;

use crate::diff::ChangeSet;

/// The cells to highlight after one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changed {
    pub competition_id: Identifier,
    pub user_ids: ChangeSet,
}

impl Changed {
    /// Whether the score cell of `user_id` in `competition_id` changed.
    pub fn is_changed(&self, competition_id: &Identifier, user_id: &Identifier) -> bool {
        &self.competition_id == competition_id && self.user_ids.contains(user_id)
    }

    /// Whether the whole row of `user_id` should be highlighted.
    pub fn is_highlighted_row(&self, competition_id: &Identifier, user_id: &Identifier) -> bool {
        &self.competition_id == competition_id && self.user_ids.last() == Some(user_id)
    }
}

/// Consumer of the full state plus the cells that just changed.
///
/// Rendering must be idempotent: the same input may be drawn more than once.
pub trait RenderSink {
    fn render(&mut self, snapshots: &[&CompetitionSnapshot], changed: Option<&Changed>);
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn render(&mut self, snapshots: &[&CompetitionSnapshot], changed: Option<&Changed>) {
        (**self).render(snapshots, changed)
    }
}

/// Writes each competition as a text table.
///
/// Changed score cells are marked with `*` and the last changed user's row
/// with `>`.
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_tables(
        &mut self,
        snapshots: &[&CompetitionSnapshot],
        changed: Option<&Changed>,
    ) -> io::Result<()> {
        for snapshot in snapshots {
            let competition_id = &snapshot.competition_id;
            writeln!(self.out, "Competition {}", competition_id)?;
            writeln!(self.out, "  {:<10} {:>12}", "User", "Score")?;
            for user in &snapshot.users {
                let row = if changed.is_some_and(|c| c.is_highlighted_row(competition_id, &user.id)) {
                    '>'
                } else {
                    ' '
                };
                let cell = if changed.is_some_and(|c| c.is_changed(competition_id, &user.id)) {
                    " *"
                } else {
                    ""
                };
                let cents = user
                    .score
                    .value()
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                let score = format!("$ {:.2}", cents);
                writeln!(self.out, "{} {:<10} {:>12}{}", row, user.id, score, cell)?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, snapshots: &[&CompetitionSnapshot], changed: Option<&Changed>) {
        if let Err(e) = self.write_tables(snapshots, changed) {
            tracing::warn!(error = %e, "failed to write leaderboard");
        }
    }
}
