//! ShadowTalk board state.
//!
//! A single in-memory store of dilemmas plus the caller's room membership and
//! selection. Every action is a synchronous transition that either commits
//! and records a [`BoardEvent`] or is rejected with a [`BoardError`] and
//! leaves the board untouched.

pub mod board;
pub mod error;
pub mod views;

pub use board::{Board, MAX_REPLY_LENGTH};
pub use error::{BoardError, Target};
pub use views::{BoardSnapshot, TRENDING_LIMIT};

pub use shadowtalk_types::{AuthorId, BoardEvent, Dilemma, DilemmaId, Emotion, Reply, ReplyId};
