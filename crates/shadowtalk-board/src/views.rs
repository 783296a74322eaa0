use serde::Serialize;

use shadowtalk_types::{AuthorId, Dilemma, DilemmaId, Emotion};

use crate::board::Board;

/// How many dilemmas the trending view shows at most.
pub const TRENDING_LIMIT: usize = 3;

/// Serializable view of the whole board, used for export.
#[derive(Debug, Serialize)]
pub struct BoardSnapshot<'a> {
    pub anon_id: &'a AuthorId,
    pub room: Option<Emotion>,
    pub selected: Option<DilemmaId>,
    pub dilemmas: Vec<&'a Dilemma>,
}

impl Board {
    /// Dilemmas in the caller's room (all of them in the lobby), newest first.
    pub fn visible_dilemmas(&self) -> Vec<&Dilemma> {
        match self.room {
            None => self.dilemmas.iter().collect(),
            Some(room) => self.dilemmas.iter().filter(|d| d.emotion() == room).collect(),
        }
    }

    /// The visible dilemmas with the most tokens, highest first.
    /// Ties keep their newest-first order.
    pub fn trending_dilemmas(&self) -> Vec<&Dilemma> {
        let mut ranked = self.visible_dilemmas();
        // sort_by is stable
        ranked.sort_by(|a, b| b.total_tokens().cmp(&a.total_tokens()));
        ranked.truncate(TRENDING_LIMIT);
        ranked
    }

    /// Number of dilemmas tagged with `emotion`, regardless of the current room.
    pub fn count_in(&self, emotion: Emotion) -> usize {
        self.dilemmas.iter().filter(|d| d.emotion() == emotion).count()
    }

    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot {
            anon_id: self.anon_id(),
            room: self.room,
            selected: self.selected,
            dilemmas: self.dilemmas.iter().collect(),
        }
    }
}
