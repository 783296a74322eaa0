use std::collections::VecDeque;
use std::mem;

use chrono::Utc;
use tracing::{debug, warn};

use shadowtalk_types::{AuthorId, BoardEvent, Dilemma, DilemmaId, Emotion, Reply, ReplyId};

use crate::error::{BoardError, Target};

/// Replies longer than this (in characters, after trimming) are rejected.
pub const MAX_REPLY_LENGTH: usize = 200;

/// The board state manager.
///
/// Owned by exactly one caller; every method runs to completion before the
/// next is invoked, so no locking is involved.
#[derive(Debug)]
pub struct Board {
    anon_id: AuthorId,
    /// Newest first.
    pub(crate) dilemmas: VecDeque<Dilemma>,
    pub(crate) room: Option<Emotion>,
    pub(crate) selected: Option<DilemmaId>,
    next_id: u64,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create an empty board for `anon_id`.
    ///
    /// `initial_room` is the persisted room membership, if any. A value that
    /// does not name a known emotion is dropped and the board starts in the lobby.
    pub fn new(anon_id: AuthorId, initial_room: Option<&str>) -> Self {
        let room = initial_room.and_then(|raw| match raw.parse::<Emotion>() {
            Ok(emotion) => Some(emotion),
            Err(e) => {
                warn!("Ignoring persisted room membership: {}", e);
                None
            }
        });
        Self::with_room(anon_id, room)
    }

    pub fn with_room(anon_id: AuthorId, room: Option<Emotion>) -> Self {
        Self {
            anon_id,
            dilemmas: VecDeque::new(),
            room,
            selected: None,
            next_id: 1,
            events: Vec::new(),
        }
    }

    // -- Transitions --

    /// Post a new dilemma. It is prepended, becomes the selection, and if the
    /// caller is in the lobby it also joins the dilemma's room.
    pub fn post_dilemma(
        &mut self,
        text: &str,
        emotion: Option<Emotion>,
    ) -> Result<DilemmaId, BoardError> {
        let trimmed = text.trim();
        let emotion = match emotion {
            Some(emotion) if !trimmed.is_empty() => emotion,
            _ => return Err(BoardError::EmptyInput),
        };

        let id = DilemmaId(self.allocate_id());
        let dilemma = Dilemma::new(
            id,
            trimmed.to_string(),
            emotion,
            self.anon_id.clone(),
            Utc::now(),
        );
        self.dilemmas.push_front(dilemma);
        self.selected = Some(id);
        self.events.push(BoardEvent::DilemmaPosted { id, emotion });
        debug!("Posted dilemma {} in {}", id, emotion);

        // First post from the lobby joins that room; later posts never move the caller.
        if self.room.is_none() {
            self.room = Some(emotion);
            self.events.push(BoardEvent::RoomJoined {
                emotion,
                implicit: true,
            });
            debug!("First post joined room {}", emotion);
        }

        Ok(id)
    }

    /// Focus a dilemma. Unknown ids leave the selection as it was.
    pub fn select_dilemma(&mut self, id: DilemmaId) -> Result<(), BoardError> {
        if self.dilemma(id).is_none() {
            return Err(BoardError::NotFound(Target::Dilemma(id)));
        }
        self.selected = Some(id);
        self.events.push(BoardEvent::DilemmaSelected { id });
        debug!("Selected dilemma {}", id);
        Ok(())
    }

    /// Reply to a dilemma in the caller's current room.
    pub fn add_reply(&mut self, dilemma_id: DilemmaId, text: &str) -> Result<ReplyId, BoardError> {
        let room = self.room;
        let required = self
            .dilemma(dilemma_id)
            .map(Dilemma::emotion)
            .ok_or(BoardError::NotFound(Target::Dilemma(dilemma_id)))?;

        if room != Some(required) {
            return Err(BoardError::RoomMismatch { room, required });
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BoardError::EmptyInput);
        }
        let len = trimmed.chars().count();
        if len > MAX_REPLY_LENGTH {
            return Err(BoardError::ReplyTooLong {
                len,
                max: MAX_REPLY_LENGTH,
            });
        }

        let reply_id = ReplyId(self.allocate_id());
        let reply = Reply::new(reply_id, trimmed.to_string(), self.anon_id.clone());
        self.dilemma_mut(dilemma_id)
            .ok_or(BoardError::NotFound(Target::Dilemma(dilemma_id)))?
            .push_reply(reply);

        self.events.push(BoardEvent::ReplyAdded {
            dilemma_id,
            reply_id,
        });
        debug!("Added reply {} to dilemma {}", reply_id, dilemma_id);
        Ok(reply_id)
    }

    /// Move to another emotion room. Clears the selection.
    pub fn join_room(&mut self, emotion: Emotion) {
        self.room = Some(emotion);
        self.selected = None;
        self.events.push(BoardEvent::RoomJoined {
            emotion,
            implicit: false,
        });
        debug!("Joined room {}", emotion);
    }

    /// Go back to the lobby. Clears the selection.
    pub fn leave_room(&mut self) {
        self.room = None;
        self.selected = None;
        self.events.push(BoardEvent::RoomLeft);
        debug!("Left room");
    }

    /// Give one empathy token to a reply and return the dilemma's new total.
    ///
    /// There is no per-caller limit: the same caller, including the reply's
    /// author, may give any number of tokens.
    pub fn give_token(&mut self, dilemma_id: DilemmaId, reply_id: ReplyId) -> Result<u64, BoardError> {
        let not_found = BoardError::NotFound(Target::Reply {
            dilemma_id,
            reply_id,
        });
        let dilemma = self.dilemma_mut(dilemma_id).ok_or(not_found.clone())?;
        let reply_tokens = dilemma.award_token(reply_id).ok_or(not_found)?;
        let total_tokens = dilemma.total_tokens();

        self.events.push(BoardEvent::TokenGiven {
            dilemma_id,
            reply_id,
            reply_tokens,
            total_tokens,
        });
        debug!(
            "Token given to reply {} on dilemma {} (reply={}, total={})",
            reply_id, dilemma_id, reply_tokens, total_tokens
        );
        Ok(total_tokens)
    }

    /// Take the events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        mem::take(&mut self.events)
    }

    // -- Reads --

    pub fn anon_id(&self) -> &AuthorId {
        &self.anon_id
    }

    pub fn room(&self) -> Option<Emotion> {
        self.room
    }

    pub fn selected_id(&self) -> Option<DilemmaId> {
        self.selected
    }

    pub fn selected_dilemma(&self) -> Option<&Dilemma> {
        self.selected.and_then(|id| self.dilemma(id))
    }

    pub fn dilemma(&self, id: DilemmaId) -> Option<&Dilemma> {
        self.dilemmas.iter().find(|d| d.id() == id)
    }

    /// Every dilemma regardless of room, newest first.
    pub fn dilemmas(&self) -> impl Iterator<Item = &Dilemma> {
        self.dilemmas.iter()
    }

    pub fn len(&self) -> usize {
        self.dilemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dilemmas.is_empty()
    }

    fn dilemma_mut(&mut self, id: DilemmaId) -> Option<&mut Dilemma> {
        self.dilemmas.iter_mut().find(|d| d.id() == id)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
