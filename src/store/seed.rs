use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::mood::MoodEntry;

struct SeedMood<'a> {
    days_ago: i64,
    rating: u8,
    emoji: &'a str,
    name: &'a str,
    note: &'a str,
}

const DEMO_WEEK: [SeedMood<'static>; 7] = [
    SeedMood {
        days_ago: 6,
        rating: 80,
        emoji: "😊",
        name: "Happy",
        note: "Had a great day at work!",
    },
    SeedMood {
        days_ago: 5,
        rating: 50,
        emoji: "😐",
        name: "Neutral",
        note: "Just an average day",
    },
    SeedMood {
        days_ago: 4,
        rating: 40,
        emoji: "😟",
        name: "Anxious",
        note: "Feeling a bit stressed",
    },
    SeedMood {
        days_ago: 3,
        rating: 60,
        emoji: "😌",
        name: "Content",
        note: "Enjoyed my morning walk",
    },
    SeedMood {
        days_ago: 2,
        rating: 30,
        emoji: "😢",
        name: "Sad",
        note: "Missing my family",
    },
    SeedMood {
        days_ago: 1,
        rating: 90,
        emoji: "😄",
        name: "Excited",
        note: "Got good news!",
    },
    SeedMood {
        days_ago: 0,
        rating: 50,
        emoji: "😐",
        name: "Neutral",
        note: "Just started my day",
    },
];

/// A week of back-dated entries, oldest first, ending at `now`.
pub fn demo_entries(now: DateTime<Utc>) -> Vec<MoodEntry> {
    DEMO_WEEK
        .iter()
        .map(|seed| MoodEntry {
            id: Uuid::new_v4(),
            date: now - Duration::days(seed.days_ago),
            mood_rating: seed.rating,
            mood_emoji: seed.emoji.to_string(),
            mood_name: seed.name.to_string(),
            text_entry: Some(seed.note.to_string()),
        })
        .collect()
}
