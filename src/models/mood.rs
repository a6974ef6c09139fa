use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_RATING: i32 = 100;

pub const JOURNAL_EMOJI: &str = "📝";
pub const JOURNAL_NAME: &str = "Journal Entry";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoodError {
    #[error("Mood rating must be between 0 and 100, got {0}")]
    RatingOutOfRange(i32),

    #[error("Journal text must not be empty")]
    EmptyJournal,

    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    #[error("{0} is not in the quick-pick row")]
    NotQuickPick(&'static str),
}

/// One logged mood. Entries are never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub mood_rating: u8,
    pub mood_emoji: String,
    pub mood_name: String,
    pub text_entry: Option<String>,
}

impl MoodEntry {
    pub fn new(
        date: DateTime<Utc>,
        mood_rating: i32,
        mood_emoji: impl Into<String>,
        mood_name: impl Into<String>,
        text_entry: Option<String>,
    ) -> Result<Self, MoodError> {
        let mood_rating = u8::try_from(mood_rating)
            .ok()
            .filter(|r| i32::from(*r) <= MAX_RATING)
            .ok_or(MoodError::RatingOutOfRange(mood_rating))?;

        Ok(Self {
            id: Uuid::new_v4(),
            date,
            mood_rating,
            mood_emoji: mood_emoji.into(),
            mood_name: mood_name.into(),
            text_entry,
        })
    }

    /// Emoji-wheel entry: no note, dated at the selected day.
    pub fn choice(
        date: DateTime<Utc>,
        mood_rating: i32,
        emotion: Emotion,
    ) -> Result<Self, MoodError> {
        Self::new(date, mood_rating, emotion.emoji(), emotion.name(), None)
    }

    /// Entry from the quick-pick row, which has its own face for some emotions.
    pub fn quick_pick(
        date: DateTime<Utc>,
        mood_rating: i32,
        emotion: Emotion,
    ) -> Result<Self, MoodError> {
        let emoji = emotion
            .quick_pick_emoji()
            .ok_or(MoodError::NotQuickPick(emotion.name()))?;
        Self::new(date, mood_rating, emoji, emotion.name(), None)
    }

    /// Free-text journal entry.
    pub fn journal(date: DateTime<Utc>, mood_rating: i32, text: &str) -> Result<Self, MoodError> {
        if text.trim().is_empty() {
            return Err(MoodError::EmptyJournal);
        }
        Self::new(
            date,
            mood_rating,
            JOURNAL_EMOJI,
            JOURNAL_NAME,
            Some(text.to_string()),
        )
    }

    pub fn to_emotion_entry(&self) -> EmotionEntry {
        EmotionEntry {
            date: self.date,
            // integer division: 85 -> 8
            emotion_level: self.mood_rating / 10,
            emotion: self.mood_name.clone(),
        }
    }

    pub fn band(&self) -> MoodBand {
        MoodBand::for_rating(self.mood_rating)
    }
}

/// Chart point derived from a [`MoodEntry`] on a 0-10 scale.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmotionEntry {
    pub date: DateTime<Utc>,
    pub emotion_level: u8,
    pub emotion: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoodBand {
    Low,
    Moderate,
    High,
}

impl MoodBand {
    pub fn for_rating(rating: u8) -> Self {
        if rating < 40 {
            Self::Low
        } else if rating < 70 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Low => "You felt bad. Try breathing exercises",
            Self::Moderate => "You're doing okay.\nHave a warm cup of tea!",
            Self::High => "You felt happy! Keep it up!",
        }
    }
}

/// One button of the quick-pick row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPick {
    pub emotion: Emotion,
    pub emoji: &'static str,
}

pub const QUICK_PICK: [QuickPick; 5] = [
    QuickPick {
        emotion: Emotion::Happy,
        emoji: "😊",
    },
    QuickPick {
        emotion: Emotion::Sad,
        emoji: "😢",
    },
    QuickPick {
        emotion: Emotion::Calm,
        emoji: "😌",
    },
    QuickPick {
        emotion: Emotion::Angry,
        emoji: "😠",
    },
    QuickPick {
        emotion: Emotion::Anxious,
        emoji: "😨",
    },
];

/// Emotions on the picker wheel, in clockwise order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Excited,
    Calm,
    Tired,
    Anxious,
    Loved,
    Normal,
}

impl Emotion {
    pub const WHEEL: [Emotion; 9] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Excited,
        Emotion::Calm,
        Emotion::Tired,
        Emotion::Anxious,
        Emotion::Loved,
        Emotion::Normal,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😢",
            Self::Angry => "😠",
            Self::Excited => "🤩",
            Self::Calm => "😌",
            Self::Tired => "😴",
            Self::Anxious => "😰",
            Self::Loved => "🥰",
            Self::Normal => "😐",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Excited => "Excited",
            Self::Calm => "Calm",
            Self::Tired => "Tired",
            Self::Anxious => "Anxious",
            Self::Loved => "Loved",
            Self::Normal => "Normal",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, MoodError> {
        let wanted = name.trim();
        Self::WHEEL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MoodError::UnknownEmotion(name.to_string()))
    }

    pub fn quick_pick_emoji(self) -> Option<&'static str> {
        QUICK_PICK
            .iter()
            .find(|pick| pick.emotion == self)
            .map(|pick| pick.emoji)
    }

    /// Sector under the wheel knob for a rotation in degrees.
    pub fn from_wheel_rotation(degrees: f64) -> Self {
        let count = Self::WHEEL.len();
        let sector = 360.0 / count as f64;
        let adjusted = degrees.rem_euclid(360.0);
        let index = (adjusted / sector).round() as usize % count;
        Self::WHEEL[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rating: i32) -> MoodEntry {
        MoodEntry::new(Utc::now(), rating, "😊", "Happy", None).unwrap()
    }

    #[test]
    fn test_emotion_level_truncates() {
        assert_eq!(entry(85).to_emotion_entry().emotion_level, 8);
        assert_eq!(entry(100).to_emotion_entry().emotion_level, 10);
        assert_eq!(entry(0).to_emotion_entry().emotion_level, 0);
        assert_eq!(entry(9).to_emotion_entry().emotion_level, 0);
    }

    #[test]
    fn test_emotion_level_full_range() {
        for r in 0..=MAX_RATING {
            let level = entry(r).to_emotion_entry().emotion_level;
            assert_eq!(i32::from(level), r / 10, "rating {r}");
        }
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let err = MoodEntry::new(Utc::now(), 101, "😊", "Happy", None).unwrap_err();
        assert_eq!(err, MoodError::RatingOutOfRange(101));
        let err = MoodEntry::new(Utc::now(), -1, "😊", "Happy", None).unwrap_err();
        assert_eq!(err, MoodError::RatingOutOfRange(-1));
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        assert_ne!(entry(50).id, entry(50).id);
    }

    #[test]
    fn test_journal_entry_shape() {
        let e = MoodEntry::journal(Utc::now(), 64, "Long walk").unwrap();
        assert_eq!(e.mood_emoji, JOURNAL_EMOJI);
        assert_eq!(e.mood_name, JOURNAL_NAME);
        assert_eq!(e.text_entry.as_deref(), Some("Long walk"));

        assert_eq!(
            MoodEntry::journal(Utc::now(), 64, "   ").unwrap_err(),
            MoodError::EmptyJournal
        );
    }

    #[test]
    fn test_choice_entry_has_no_note() {
        let e = MoodEntry::choice(Utc::now(), 30, Emotion::Tired).unwrap();
        assert_eq!(e.mood_emoji, "😴");
        assert_eq!(e.mood_name, "Tired");
        assert!(e.text_entry.is_none());
    }

    #[test]
    fn test_quick_pick_entry_uses_row_emoji() {
        let e = MoodEntry::quick_pick(Utc::now(), 45, Emotion::Anxious).unwrap();
        assert_eq!(e.mood_emoji, "😨");
        assert_eq!(e.mood_name, "Anxious");
        assert_eq!(Emotion::Anxious.emoji(), "😰");

        assert_eq!(
            MoodEntry::quick_pick(Utc::now(), 45, Emotion::Tired).unwrap_err(),
            MoodError::NotQuickPick("Tired")
        );
    }

    #[test]
    fn test_mood_band_thresholds() {
        assert_eq!(MoodBand::for_rating(0), MoodBand::Low);
        assert_eq!(MoodBand::for_rating(39), MoodBand::Low);
        assert_eq!(MoodBand::for_rating(40), MoodBand::Moderate);
        assert_eq!(MoodBand::for_rating(69), MoodBand::Moderate);
        assert_eq!(MoodBand::for_rating(70), MoodBand::High);
        assert_eq!(MoodBand::for_rating(100), MoodBand::High);
    }

    #[test]
    fn test_emotion_from_name() {
        assert_eq!(Emotion::from_name("anxious").unwrap(), Emotion::Anxious);
        assert_eq!(Emotion::from_name(" Loved ").unwrap(), Emotion::Loved);
        assert!(matches!(
            Emotion::from_name("Grumpy"),
            Err(MoodError::UnknownEmotion(_))
        ));
    }

    #[test]
    fn test_wheel_rotation_sectors() {
        assert_eq!(Emotion::from_wheel_rotation(0.0), Emotion::Happy);
        assert_eq!(Emotion::from_wheel_rotation(40.0), Emotion::Sad);
        assert_eq!(Emotion::from_wheel_rotation(59.0), Emotion::Sad);
        assert_eq!(Emotion::from_wheel_rotation(61.0), Emotion::Angry);
        assert_eq!(Emotion::from_wheel_rotation(320.0), Emotion::Normal);
        // past the last sector rounds back to the first
        assert_eq!(Emotion::from_wheel_rotation(355.0), Emotion::Happy);
        assert_eq!(Emotion::from_wheel_rotation(400.0), Emotion::Sad);
        assert_eq!(Emotion::from_wheel_rotation(-40.0), Emotion::Normal);
    }
}
