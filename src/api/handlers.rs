//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, CreateChatRequest, ErrorResponse, MoodListResponse,
    MoodStatsResponse, PatternsResponse, PhaseResponse, SaveMoodRequest, SaveMoodResponse,
    SessionResponse, SuccessResponse, TodayMoodResponse,
};
use super::AppState;
use crate::calm::BreathingPattern;
use crate::db::DbError;
use crate::dialogue::MoodHint;
use crate::runtime::{ChatEvent, RuntimeError};
use crate::sound::tone_for;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Chat sessions
        .route("/api/chat", post(create_chat))
        .route("/api/chat/:id", get(get_chat).delete(delete_chat))
        .route("/api/chat/:id/messages", post(send_message))
        .route("/api/chat/:id/stream", get(stream_chat))
        // Mood journal
        .route("/api/moods", get(list_moods).post(save_mood))
        .route("/api/moods/today", get(today_mood))
        .route("/api/moods/stats", get(mood_stats))
        // Breathing exercise
        .route("/api/breathing/patterns", get(breathing_patterns))
        .route("/api/breathing/:pattern/at/:elapsed", get(breathing_phase))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Sessions
// ============================================================

async fn create_chat(
    State(state): State<AppState>,
    Json(req): Json<CreateChatRequest>,
) -> Json<SessionResponse> {
    let session = state
        .runtime
        .create(req.mood.and_then(MoodHint::from_mood))
        .await;
    Json(SessionResponse { session })
}

async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.runtime.snapshot(&id).await?;
    Ok(Json(SessionResponse { session }))
}

async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let queued = state.runtime.submit(&id, req.text).await?;
    Ok(Json(ChatResponse { queued }))
}

async fn stream_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (snapshot, broadcast_rx) = state.runtime.subscribe(&id).await?;
    Ok(sse_stream(ChatEvent::Init { snapshot }, broadcast_rx))
}

async fn delete_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.runtime.discard(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Mood Journal
// ============================================================

async fn save_mood(
    State(state): State<AppState>,
    Json(req): Json<SaveMoodRequest>,
) -> Result<Json<SaveMoodResponse>, AppError> {
    let entry = state.db.save_mood(req.mood, req.reflection.as_deref())?;
    Ok(Json(SaveMoodResponse {
        tone: tone_for(entry.mood),
        entry,
    }))
}

async fn list_moods(State(state): State<AppState>) -> Result<Json<MoodListResponse>, AppError> {
    let moods = state.db.list_moods()?;
    Ok(Json(MoodListResponse { moods }))
}

async fn today_mood(State(state): State<AppState>) -> Result<Json<TodayMoodResponse>, AppError> {
    let entry = state.db.today_mood(Utc::now())?;
    Ok(Json(TodayMoodResponse { entry }))
}

async fn mood_stats(State(state): State<AppState>) -> Result<Json<MoodStatsResponse>, AppError> {
    let now = Utc::now();
    let stats = state.db.mood_stats(now)?;
    let moods = state.db.weekly_moods(now)?;
    Ok(Json(MoodStatsResponse {
        total: stats.total(),
        stats,
        moods,
    }))
}

// ============================================================
// Breathing Exercise
// ============================================================

async fn breathing_patterns() -> Json<PatternsResponse> {
    Json(PatternsResponse {
        patterns: BreathingPattern::ALL.into_iter().map(BreathingPattern::info).collect(),
    })
}

/// Phase a client should show `elapsed` seconds into an exercise
async fn breathing_phase(
    Path((pattern, elapsed)): Path<(String, u32)>,
) -> Result<Json<PhaseResponse>, AppError> {
    let pattern: BreathingPattern = pattern.parse().map_err(AppError::NotFound)?;
    Ok(Json(PhaseResponse {
        position: pattern.phase_at(elapsed),
    }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("mindease ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::SessionNotFound(_) => AppError::NotFound(e.to_string()),
            RuntimeError::Busy => AppError::Conflict(e.to_string()),
            RuntimeError::Stopped(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        tracing::error!(error = %e, "Mood store failure");
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
