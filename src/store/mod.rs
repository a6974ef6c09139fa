use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc};

use crate::models::mood::{EmotionEntry, MoodEntry};

pub mod seed;

/// Session-scoped, append-only collection of mood entries.
///
/// Entries keep insertion order; nothing here re-sorts by `date`. Day
/// comparisons use `offset` as the local calendar.
#[derive(Debug, Clone)]
pub struct MoodStore {
    entries: Vec<MoodEntry>,
    offset: FixedOffset,
}

impl Default for MoodStore {
    fn default() -> Self {
        Self::new(utc_offset())
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

impl MoodStore {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            entries: Vec::new(),
            offset,
        }
    }

    /// Store pre-filled with the week of demo entries ending at `now`.
    pub fn seeded(offset: FixedOffset, now: DateTime<Utc>) -> Self {
        let mut store = Self::new(offset);
        for entry in seed::demo_entries(now) {
            store.append(entry);
        }
        store
    }

    pub fn append(&mut self, entry: MoodEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn local_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Local calendar day for "now".
    pub fn today(&self) -> NaiveDate {
        self.local_day(Utc::now())
    }

    pub fn entries_on(&self, at: DateTime<Utc>) -> Vec<&MoodEntry> {
        self.entries_on_day(self.local_day(at))
    }

    pub fn entries_on_day(&self, day: NaiveDate) -> Vec<&MoodEntry> {
        self.entries
            .iter()
            .filter(|e| self.local_day(e.date) == day)
            .collect()
    }

    pub fn has_entry_on(&self, at: DateTime<Utc>) -> bool {
        self.has_entry_on_day(self.local_day(at))
    }

    pub fn has_entry_on_day(&self, day: NaiveDate) -> bool {
        self.entries.iter().any(|e| self.local_day(e.date) == day)
    }

    pub fn as_emotion_series(&self) -> Vec<EmotionEntry> {
        self.entries.iter().map(MoodEntry::to_emotion_entry).collect()
    }

    /// Mean rating, 0.0 when empty.
    pub fn average_rating(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: u32 = self.entries.iter().map(|e| u32::from(e.mood_rating)).sum();
        f64::from(total) / self.entries.len() as f64
    }

    /// Percent change from the first to the last entry, truncated toward zero.
    /// 0 with fewer than two entries or when the first rating is 0.
    pub fn improvement_percent(&self) -> i64 {
        let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) else {
            return 0;
        };
        if self.entries.len() < 2 || first.mood_rating == 0 {
            return 0;
        }
        let first = i64::from(first.mood_rating);
        let last = i64::from(last.mood_rating);
        (last - first) * 100 / first
    }

    /// The Sunday-started week containing `day`, each day flagged with
    /// whether it has any entry.
    pub fn week_of(&self, day: NaiveDate) -> Vec<(NaiveDate, bool)> {
        let start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
        (0..7)
            .map(|i| {
                let d = start + Duration::days(i);
                (d, self.has_entry_on_day(d))
            })
            .collect()
    }
}
