use serde::Serialize;

use crate::emotion::Emotion;
use crate::models::{DilemmaId, ReplyId};

/// Recorded by the board after a transition commits.
/// Rejected transitions record nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum BoardEvent {
    /// A new dilemma was prepended to the board
    DilemmaPosted { id: DilemmaId, emotion: Emotion },

    /// Focus moved to a dilemma; any in-progress reply draft is stale
    DilemmaSelected { id: DilemmaId },

    /// A reply was appended to a dilemma's thread
    ReplyAdded { dilemma_id: DilemmaId, reply_id: ReplyId },

    /// Room membership changed. `implicit` is set when a first post joined the room.
    RoomJoined { emotion: Emotion, implicit: bool },

    /// The caller went back to the lobby
    RoomLeft,

    /// An empathy token was given to a reply
    TokenGiven {
        dilemma_id: DilemmaId,
        reply_id: ReplyId,
        reply_tokens: u64,
        total_tokens: u64,
    },
}

impl BoardEvent {
    /// Returns the new membership if this event changed it.
    /// `Some(None)` means the caller moved back to the lobby.
    pub fn membership_change(&self) -> Option<Option<Emotion>> {
        match self {
            Self::RoomJoined { emotion, .. } => Some(Some(*emotion)),
            Self::RoomLeft => Some(None),
            _ => None,
        }
    }
}
