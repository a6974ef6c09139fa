//! # Mindful: Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Field-level validation uses `validator` derive macros; cross-field rules
//!   live in the `impl` blocks at the bottom

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::backdrop::Backdrop;
use crate::models::mood::{Emotion, MoodBand, MoodEntry, QuickPick};
use crate::services::breathing::{Phase, Technique};

// ============================================================================
// Moods
// ============================================================================

/// How the entry was logged.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoodEntryKind {
    /// Emoji wheel + rating slider
    Choice,
    /// Free-text journal + rating slider
    Journal,
}

/// POST /api/moods
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodRequest {
    pub kind: MoodEntryKind,

    #[validate(range(min = 0, max = 100, message = "Mood rating must be 0-100"))]
    pub mood_rating: i32,

    /// Choice only: emotion name ("happy", "Anxious", ...)
    pub emotion: Option<String>,

    /// Choice only: wheel knob rotation in degrees, used when `emotion` is absent
    pub wheel_rotation: Option<f64>,

    /// Choice only: logged from the quick-pick row rather than the wheel
    #[serde(default)]
    pub quick_pick: bool,

    /// Choice only: day the entry is for. Default: now.
    pub date: Option<NaiveDate>,

    /// Journal only
    #[validate(length(max = 5000, message = "Journal text must be under 5000 characters"))]
    pub text: Option<String>,
}

/// GET /api/moods, /api/moods/has-entry, /api/moods/week
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// Local calendar day. Default: today (has-entry, week) or all days (list).
    pub date: Option<NaiveDate>,

    /// List only: restrict to today when no `date` is given
    pub today: Option<bool>,
}

/// Stored entry plus its display band
#[derive(Debug, Serialize)]
pub struct MoodEntryResponse {
    #[serde(flatten)]
    pub entry: MoodEntry,
    pub band: MoodBand,
    pub band_message: &'static str,
}

impl From<&MoodEntry> for MoodEntryResponse {
    fn from(entry: &MoodEntry) -> Self {
        let band = entry.band();
        Self {
            entry: entry.clone(),
            band,
            band_message: band.message(),
        }
    }
}

/// GET /api/moods/has-entry
#[derive(Debug, Serialize, Deserialize)]
pub struct HasEntryResponse {
    pub date: NaiveDate,
    pub has_entry: bool,
}

/// GET /api/moods/stats
#[derive(Debug, Serialize, Deserialize)]
pub struct MoodStatsResponse {
    pub count: usize,
    pub average_rating: f64,
    pub improvement_percent: i64,
}

/// One day of the week strip
#[derive(Debug, Serialize, Deserialize)]
pub struct WeekDayResponse {
    pub date: NaiveDate,
    pub has_entry: bool,
    pub is_selected: bool,
}

/// One emotion as a picker shows it
#[derive(Debug, Serialize)]
pub struct EmotionResponse {
    pub key: Emotion,
    pub name: &'static str,
    pub emoji: &'static str,
}

impl From<Emotion> for EmotionResponse {
    fn from(emotion: Emotion) -> Self {
        Self {
            key: emotion,
            name: emotion.name(),
            emoji: emotion.emoji(),
        }
    }
}

impl From<QuickPick> for EmotionResponse {
    fn from(pick: QuickPick) -> Self {
        Self {
            key: pick.emotion,
            name: pick.emotion.name(),
            emoji: pick.emoji,
        }
    }
}

/// GET /api/emotions
#[derive(Debug, Serialize)]
pub struct EmotionCatalogResponse {
    pub wheel: Vec<EmotionResponse>,
    pub quick_pick: Vec<EmotionResponse>,
}

// ============================================================================
// Analysis
// ============================================================================

/// GET /api/analysis/questions
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// POST /api/analysis: one answer per question, same order
#[derive(Debug, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(equal = 10, message = "Exactly 10 answers are required"))]
    pub answers: Vec<String>,
}

/// Diagnosis text, or the error text shown in its place
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub diagnosis: String,
}

// ============================================================================
// Breathing
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PhaseStep {
    pub phase: Phase,
    pub label: &'static str,
    pub secs: u64,
}

/// GET /api/breathing/techniques
#[derive(Debug, Serialize)]
pub struct TechniqueResponse {
    #[serde(flatten)]
    pub technique: Technique,
    pub cycle_secs: u64,
    pub schedule: Vec<PhaseStep>,
}

impl From<Technique> for TechniqueResponse {
    fn from(technique: Technique) -> Self {
        let schedule = technique
            .schedule()
            .into_iter()
            .map(|(phase, secs)| PhaseStep {
                phase,
                label: phase.label(),
                secs,
            })
            .collect();
        Self {
            cycle_secs: technique.cycle_secs(),
            schedule,
            technique,
        }
    }
}

// ============================================================================
// Backdrop
// ============================================================================

/// GET/PUT /api/backdrop
#[derive(Debug, Serialize)]
pub struct BackdropResponse {
    pub backdrop: Backdrop,
    pub icon: &'static str,
    pub palette: &'static [&'static str],
}

impl From<Backdrop> for BackdropResponse {
    fn from(backdrop: Backdrop) -> Self {
        Self {
            backdrop,
            icon: backdrop.icon(),
            palette: backdrop.palette(),
        }
    }
}

/// PUT /api/backdrop: either the variant or the picker icon
#[derive(Debug, Deserialize)]
pub struct SetBackdropRequest {
    pub backdrop: Option<Backdrop>,
    pub icon: Option<String>,
}

// ============================================================================
// System
// ============================================================================

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /readyz
#[derive(Debug, Serialize)]
pub struct ReadyzResponse {
    pub status: &'static str,
    pub checks: ReadyzChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyzChecks {
    pub mood_entries: usize,
    pub analysis_configured: bool,
}

// ============================================================================
// Validation helpers
// ============================================================================

impl CreateMoodRequest {
    /// Emotion for a choice entry: named emotion wins over wheel rotation
    pub fn resolve_emotion(&self) -> Result<Emotion, String> {
        match (&self.emotion, self.wheel_rotation) {
            (Some(name), _) => Emotion::from_name(name).map_err(|e| e.to_string()),
            (None, Some(degrees)) if degrees.is_finite() => {
                Ok(Emotion::from_wheel_rotation(degrees))
            }
            (None, Some(_)) => Err("wheel_rotation must be a finite number".into()),
            (None, None) => Err("Choice entries require emotion or wheel_rotation".into()),
        }
    }

    /// Timestamp for a choice entry: local midnight of `date` or now
    pub fn choice_timestamp(
        &self,
        offset: chrono::FixedOffset,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        match self.date {
            Some(day) => day
                .and_hms_opt(0, 0, 0)
                .and_then(|midnight| midnight.and_local_timezone(offset).single())
                .map(|local| local.with_timezone(&Utc))
                .unwrap_or(now),
            None => now,
        }
    }
}

impl AnalysisRequest {
    /// Every answer must be non-blank
    pub fn validate_answers(&self) -> Result<(), String> {
        match self.answers.iter().position(|a| a.trim().is_empty()) {
            Some(i) => Err(format!("Answer {} must not be empty", i + 1)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn choice(
        emotion: Option<&str>,
        rotation: Option<f64>,
        date: Option<NaiveDate>,
    ) -> CreateMoodRequest {
        CreateMoodRequest {
            kind: MoodEntryKind::Choice,
            mood_rating: 50,
            emotion: emotion.map(String::from),
            wheel_rotation: rotation,
            quick_pick: false,
            date,
            text: None,
        }
    }

    #[test]
    fn test_resolve_emotion() {
        assert_eq!(choice(Some("calm"), Some(40.0), None).resolve_emotion(), Ok(Emotion::Calm));
        assert_eq!(choice(None, Some(40.0), None).resolve_emotion(), Ok(Emotion::Sad));
        assert!(choice(None, None, None).resolve_emotion().is_err());
        assert!(choice(None, Some(f64::NAN), None).resolve_emotion().is_err());
        assert!(choice(Some("meh"), None, None).resolve_emotion().is_err());
    }

    #[test]
    fn test_choice_timestamp_is_local_midnight() {
        let now = Utc.with_ymd_and_hms(2025, 4, 12, 15, 0, 0).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(choice(None, None, None).choice_timestamp(plus_two, now), now);
        assert_eq!(
            choice(None, None, Some(day)).choice_timestamp(plus_two, now),
            Utc.with_ymd_and_hms(2025, 4, 9, 22, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_validation_rules() {
        let mut req = choice(Some("happy"), None, None);
        req.mood_rating = 101;
        assert!(req.validate().is_err());

        let answers = AnalysisRequest {
            answers: vec!["ok".to_string(); 9],
        };
        assert!(answers.validate().is_err());

        let mut answers = AnalysisRequest {
            answers: vec!["ok".to_string(); 10],
        };
        assert!(answers.validate().is_ok());
        assert!(answers.validate_answers().is_ok());
        answers.answers[3] = "  ".into();
        assert_eq!(answers.validate_answers(), Err("Answer 4 must not be empty".into()));
    }
}
