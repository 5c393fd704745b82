use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoodTag {
    Happy,
    Sad,
    Angry,
    Anxious,
    Tired,
    Empty,
    NeedComfort,
    Lost,
    Other(String),
}

impl MoodTag {
    pub const ALL: [MoodTag; 8] = [
        MoodTag::Happy,
        MoodTag::Sad,
        MoodTag::Angry,
        MoodTag::Anxious,
        MoodTag::Tired,
        MoodTag::Empty,
        MoodTag::NeedComfort,
        MoodTag::Lost,
    ];

    pub fn label(&self) -> &str {
        match self {
            MoodTag::Happy => "🌞 開心",
            MoodTag::Sad => "🌧 難過",
            MoodTag::Angry => "😠 生氣",
            MoodTag::Anxious => "😰 焦慮",
            MoodTag::Tired => "💤 疲憊",
            MoodTag::Empty => "🫧 空虛",
            MoodTag::NeedComfort => "🩷 想被安慰",
            MoodTag::Lost => "😵 迷茫",
            MoodTag::Other(label) => label,
        }
    }

    fn alias(&self) -> Option<&'static str> {
        match self {
            MoodTag::Happy => Some("happy"),
            MoodTag::Sad => Some("sad"),
            MoodTag::Angry => Some("angry"),
            MoodTag::Anxious => Some("anxious"),
            MoodTag::Tired => Some("tired"),
            MoodTag::Empty => Some("empty"),
            MoodTag::NeedComfort => Some("comfort"),
            MoodTag::Lost => Some("lost"),
            MoodTag::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MoodTag::Other(_))
    }

    /// Accepts the full label, the word without its emoji, or the English alias.
    pub fn parse(input: &str) -> MoodTag {
        let trimmed = input.trim();
        for tag in MoodTag::ALL {
            let label = tag.label();
            let word = label.split_once(' ').map(|(_, word)| word).unwrap_or(label);
            if trimmed == label
                || trimmed == word
                || tag.alias().is_some_and(|alias| trimmed.eq_ignore_ascii_case(alias))
            {
                return tag;
            }
        }
        MoodTag::Other(trimmed.to_string())
    }
}

impl Default for MoodTag {
    fn default() -> Self {
        MoodTag::Happy
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MoodTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MoodTag::parse(s))
    }
}

// Stored labels are matched exactly so an unknown label round-trips verbatim.
impl From<String> for MoodTag {
    fn from(label: String) -> Self {
        MoodTag::ALL
            .into_iter()
            .find(|tag| tag.label() == label)
            .unwrap_or(MoodTag::Other(label))
    }
}

impl From<MoodTag> for String {
    fn from(tag: MoodTag) -> Self {
        match tag {
            MoodTag::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: String,
    pub reply: String,
    pub tag: MoodTag,
}

impl MoodEntry {
    pub fn new(mood: impl Into<String>, reply: impl Into<String>, tag: MoodTag) -> Self {
        Self {
            mood: mood.into(),
            reply: reply.into(),
            tag,
        }
    }
}
