//! Shared data model for the ShadowTalk board: emotions, dilemmas, replies,
//! and the events a board records when a transition commits.

pub mod emotion;
pub mod events;
pub mod models;

pub use emotion::{Emotion, ParseEmotionError};
pub use events::BoardEvent;
pub use models::{AuthorId, Dilemma, DilemmaId, Reply, ReplyId};
