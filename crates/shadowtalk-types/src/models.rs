use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::emotion::Emotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DilemmaId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReplyId(pub u64);

impl fmt::Display for DilemmaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The client-local anonymous identifier that authors posts and replies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A short response to a dilemma. Only the token count changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    id: ReplyId,
    text: String,
    author_id: AuthorId,
    tokens: u64,
}

impl Reply {
    pub fn new(id: ReplyId, text: String, author_id: AuthorId) -> Self {
        Self {
            id,
            text,
            author_id,
            tokens: 0,
        }
    }

    pub fn id(&self) -> ReplyId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn tokens(&self) -> u64 {
        self.tokens
    }
}

/// A posted problem statement tagged with one emotion.
///
/// Append-only: replies can be added and tokens awarded, nothing is edited
/// or removed. `total_tokens` is always the sum over `replies` and has no
/// setter of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dilemma {
    id: DilemmaId,
    text: String,
    emotion: Emotion,
    author_id: AuthorId,
    created_at: DateTime<Utc>,
    replies: Vec<Reply>,
    total_tokens: u64,
}

impl Dilemma {
    pub fn new(
        id: DilemmaId,
        text: String,
        emotion: Emotion,
        author_id: AuthorId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            emotion,
            author_id,
            created_at,
            replies: Vec::new(),
            total_tokens: 0,
        }
    }

    pub fn id(&self) -> DilemmaId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    pub fn reply(&self, id: ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == id)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Append a reply to the end of the thread.
    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push(reply);
        self.recompute_total();
    }

    /// Give one empathy token to `reply_id`.
    /// Returns the reply's new count, or `None` if the reply is not in this thread.
    pub fn award_token(&mut self, reply_id: ReplyId) -> Option<u64> {
        let reply = self.replies.iter_mut().find(|r| r.id == reply_id)?;
        reply.tokens += 1;
        let tokens = reply.tokens;
        self.recompute_total();
        Some(tokens)
    }

    fn recompute_total(&mut self) {
        self.total_tokens = self.replies.iter().map(|r| r.tokens).sum();
    }
}
