use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{Course, TimetableEntry, TimetableError, TimetableManager};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Timetable API. Use the endpoints to manage courses and timetables.";

#[derive(Clone)]
pub struct AppState {
    manager: TimetableManager,
}

impl AppState {
    pub fn new(manager: TimetableManager) -> Self {
        Self { manager }
    }

    /// Run a store-backed manager call on the blocking pool. The SQLite store
    /// locks a mutex and touches the disk, so it stays off the async workers.
    async fn run<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce(&TimetableManager) -> crate::manager::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || call(&manager))
            .await
            .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?
            .map_err(ApiError::from)
    }
}

/// Success envelope shared by every data route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseBody<T> {
    pub message: String,
    pub data: T,
}

fn respond<T>(message: &str, data: T) -> Json<ResponseBody<T>> {
    Json(ResponseBody {
        message: message.to_string(),
        data,
    })
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    CourseNotFound(String),
    Internal(String),
}

impl From<TimetableError> for ApiError {
    fn from(value: TimetableError) -> Self {
        match value {
            TimetableError::CourseNotFound(_) => ApiError::CourseNotFound(value.to_string()),
            TimetableError::Store(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::CourseNotFound(message) => {
                let body = Json(ErrorBody {
                    error: "course_not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Internal(message) => {
                error!(%message, "request failed");
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoursePayload {
    course_name: String,
}

#[derive(Debug, Deserialize)]
struct EntryPayload {
    course_name: String,
    day: String,
    period: i32,
    subject_name: String,
    teacher_name: String,
    classroom: String,
}

#[derive(Debug, Deserialize)]
struct SlotPayload {
    course_name: String,
    day: String,
    period: i32,
}

#[derive(Debug, Deserialize)]
struct TimetableQuery {
    course_name: String,
    day: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/add_course", post(add_course))
        .route("/add_timetable_entry", post(add_timetable_entry))
        .route("/update_timetable_entry", post(update_timetable_entry))
        .route("/delete_timetable", post(delete_timetable))
        .route("/get_all_courses", post(get_all_courses))
        .route("/get_timetable", post(get_timetable))
        .route("/get_all_timetables", post(get_all_timetables))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(addr: SocketAddr, manager: TimetableManager) -> std::io::Result<()> {
    let app = router(AppState::new(manager));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "timetable HTTP API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn add_course(
    State(state): State<AppState>,
    Json(payload): Json<CoursePayload>,
) -> Result<Json<ResponseBody<Course>>, ApiError> {
    let course = state
        .run(move |manager| manager.add_course(&payload.course_name))
        .await?;
    Ok(respond("Course added successfully", course))
}

async fn add_timetable_entry(
    State(state): State<AppState>,
    Json(entry): Json<EntryPayload>,
) -> Result<Json<ResponseBody<TimetableEntry>>, ApiError> {
    let created = state
        .run(move |manager| {
            manager.add_timetable_entry(
                &entry.course_name,
                &entry.day,
                entry.period,
                &entry.subject_name,
                &entry.teacher_name,
                &entry.classroom,
            )
        })
        .await?;
    Ok(respond("Timetable entry added successfully", created))
}

async fn update_timetable_entry(
    State(state): State<AppState>,
    Json(entry): Json<EntryPayload>,
) -> Result<Json<ResponseBody<Vec<TimetableEntry>>>, ApiError> {
    let updated = state
        .run(move |manager| {
            manager.update_timetable_entry(
                &entry.course_name,
                &entry.day,
                entry.period,
                &entry.subject_name,
                &entry.teacher_name,
                &entry.classroom,
            )
        })
        .await?;
    Ok(respond("Timetable entry updated successfully", updated))
}

async fn delete_timetable(
    State(state): State<AppState>,
    Json(slot): Json<SlotPayload>,
) -> Result<Json<ResponseBody<Vec<TimetableEntry>>>, ApiError> {
    let deleted = state
        .run(move |manager| {
            manager.delete_timetable_entry(&slot.course_name, &slot.day, slot.period)
        })
        .await?;
    Ok(respond("Timetable entry deleted successfully", deleted))
}

async fn get_all_courses(
    State(state): State<AppState>,
) -> Result<Json<ResponseBody<Vec<Course>>>, ApiError> {
    let courses = state.run(|manager| manager.get_all_courses()).await?;
    Ok(respond("Courses retrieved successfully", courses))
}

async fn get_timetable(
    State(state): State<AppState>,
    Json(query): Json<TimetableQuery>,
) -> Result<Json<ResponseBody<Vec<TimetableEntry>>>, ApiError> {
    let entries = state
        .run(move |manager| manager.get_timetable(&query.course_name, &query.day))
        .await?;
    Ok(respond("Timetable retrieved successfully", entries))
}

async fn get_all_timetables(
    State(state): State<AppState>,
) -> Result<Json<ResponseBody<Vec<TimetableEntry>>>, ApiError> {
    let entries = state.run(|manager| manager.get_all_timetables()).await?;
    Ok(respond("All timetables retrieved successfully", entries))
}
