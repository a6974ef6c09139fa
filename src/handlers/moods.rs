use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{
    CreateMoodRequest, DayQuery, EmotionCatalogResponse, EmotionResponse, HasEntryResponse,
    MoodEntryKind,
    MoodEntryResponse, MoodStatsResponse, WeekDayResponse,
};
use crate::error::{AppError, AppResult};
use crate::models::mood::{Emotion, EmotionEntry, MoodEntry, QUICK_PICK};
use crate::AppState;

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<Json<MoodEntryResponse>> {
    body.validate()?;

    let now = Utc::now();
    let entry = match body.kind {
        MoodEntryKind::Choice => {
            let emotion = body.resolve_emotion().map_err(AppError::Validation)?;
            let date = body.choice_timestamp(state.config.mood_offset(), now);
            if body.quick_pick {
                MoodEntry::quick_pick(date, body.mood_rating, emotion)?
            } else {
                MoodEntry::choice(date, body.mood_rating, emotion)?
            }
        }
        // Journal entries are always dated now, whatever day is selected.
        MoodEntryKind::Journal => {
            MoodEntry::journal(now, body.mood_rating, body.text.as_deref().unwrap_or_default())?
        }
    };

    let response = MoodEntryResponse::from(&entry);
    let entry_id = entry.id;
    state.moods.write().await.append(entry);

    tracing::info!(
        entry_id = %entry_id,
        kind = ?body.kind,
        rating = body.mood_rating,
        "Mood logged"
    );

    crate::handlers::ws::publish(
        &state,
        serde_json::json!({
            "type": "mood_logged",
            "entry_id": entry_id,
        }),
    );

    Ok(Json(response))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Json<Vec<MoodEntryResponse>> {
    let store = state.moods.read().await;
    let entries = match (query.date, query.today) {
        (Some(day), _) => store
            .entries_on_day(day)
            .into_iter()
            .map(MoodEntryResponse::from)
            .collect(),
        (None, Some(true)) => store
            .entries_on(Utc::now())
            .into_iter()
            .map(MoodEntryResponse::from)
            .collect(),
        (None, _) => store.entries().iter().map(MoodEntryResponse::from).collect(),
    };
    Json(entries)
}

pub async fn has_entry(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Json<HasEntryResponse> {
    let store = state.moods.read().await;
    let (date, has_entry) = match query.date {
        Some(day) => (day, store.has_entry_on_day(day)),
        None => {
            let now = Utc::now();
            (store.local_day(now), store.has_entry_on(now))
        }
    };
    Json(HasEntryResponse { date, has_entry })
}

pub async fn emotion_series(State(state): State<AppState>) -> Json<Vec<EmotionEntry>> {
    Json(state.moods.read().await.as_emotion_series())
}

pub async fn mood_stats(State(state): State<AppState>) -> Json<MoodStatsResponse> {
    let store = state.moods.read().await;
    Json(MoodStatsResponse {
        count: store.len(),
        average_rating: store.average_rating(),
        improvement_percent: store.improvement_percent(),
    })
}

pub async fn week_strip(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Json<Vec<WeekDayResponse>> {
    let store = state.moods.read().await;
    let selected = query.date.unwrap_or_else(|| store.today());
    let days = store
        .week_of(selected)
        .into_iter()
        .map(|(date, has_entry)| WeekDayResponse {
            date,
            has_entry,
            is_selected: date == selected,
        })
        .collect();
    Json(days)
}

pub async fn list_emotions() -> Json<EmotionCatalogResponse> {
    Json(EmotionCatalogResponse {
        wheel: Emotion::WHEEL.into_iter().map(EmotionResponse::from).collect(),
        quick_pick: QUICK_PICK.into_iter().map(EmotionResponse::from).collect(),
    })
}
