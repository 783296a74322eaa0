use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of emotion rooms. Each dilemma carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Confused,
    Lonely,
    Angry,
    Embarrassed,
    Stressed,
}

impl Emotion {
    /// Every emotion, in display order.
    pub const ALL: [Emotion; 5] = [
        Emotion::Confused,
        Emotion::Lonely,
        Emotion::Angry,
        Emotion::Embarrassed,
        Emotion::Stressed,
    ];

    /// Stable identifier, also used when persisting room membership.
    pub fn id(self) -> &'static str {
        match self {
            Self::Confused => "confused",
            Self::Lonely => "lonely",
            Self::Angry => "angry",
            Self::Embarrassed => "embarrassed",
            Self::Stressed => "stressed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Confused => "Confused",
            Self::Lonely => "Lonely",
            Self::Angry => "Angry",
            Self::Embarrassed => "Embarrassed",
            Self::Stressed => "Stressed",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Confused => "😕",
            Self::Lonely => "😔",
            Self::Angry => "😠",
            Self::Embarrassed => "😳",
            Self::Stressed => "😰",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string does not name one of the fixed emotions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion '{0}'")]
pub struct ParseEmotionError(pub String);

impl FromStr for Emotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Emotion::ALL
            .into_iter()
            .find(|e| e.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseEmotionError(s.to_string()))
    }
}
