use std::fmt;

use shadowtalk_types::{DilemmaId, Emotion, ParseEmotionError, ReplyId};

/// What a `NotFound` failure was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Dilemma(DilemmaId),
    Reply { dilemma_id: DilemmaId, reply_id: ReplyId },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dilemma(id) => write!(f, "dilemma {}", id),
            Self::Reply { dilemma_id, reply_id } => {
                write!(f, "reply {} on dilemma {}", reply_id, dilemma_id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("nothing to post: text is blank or no emotion was chosen")]
    EmptyInput,

    #[error("reply is {len} characters long, the limit is {max}")]
    ReplyTooLong { len: usize, max: usize },

    #[error(
        "you can only reply to dilemmas in your current emotion room (you are in {}, this one is {required}); switch to the matching room first",
        room_name(.room)
    )]
    RoomMismatch {
        room: Option<Emotion>,
        required: Emotion,
    },

    #[error("{0} not found")]
    NotFound(Target),

    #[error("unknown emotion '{0}'")]
    InvalidEmotion(String),
}

impl From<ParseEmotionError> for BoardError {
    fn from(err: ParseEmotionError) -> Self {
        Self::InvalidEmotion(err.0)
    }
}

fn room_name(room: &Option<Emotion>) -> &'static str {
    room.map_or("the lobby", Emotion::id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_mismatch_names_both_rooms() {
        let err = BoardError::RoomMismatch {
            room: Some(Emotion::Angry),
            required: Emotion::Lonely,
        };
        let msg = err.to_string();
        assert!(msg.contains("you are in angry"));
        assert!(msg.contains("this one is lonely"));

        let lobby = BoardError::RoomMismatch {
            room: None,
            required: Emotion::Stressed,
        };
        assert!(lobby.to_string().contains("you are in the lobby"));
    }

    #[test]
    fn parse_error_converts_to_invalid_emotion() {
        let err: BoardError = "sleepy".parse::<Emotion>().unwrap_err().into();
        assert_eq!(err, BoardError::InvalidEmotion("sleepy".into()));
    }

    #[test]
    fn not_found_describes_target() {
        let err = BoardError::NotFound(Target::Reply {
            dilemma_id: DilemmaId(3),
            reply_id: ReplyId(7),
        });
        assert_eq!(err.to_string(), "reply 7 on dilemma 3 not found");
    }
}
