#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use course_timetable::{SqliteRecordStore, TimetableManager, http_api};
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    let store = SqliteRecordStore::in_memory().unwrap();
    let state = http_api::AppState::new(TimetableManager::from_store(store));
    http_api::router(state)
}

async fn post_json(app: &axum::Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_empty(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn cs101_monday(period: i32, subject: &str) -> Value {
    json!({
        "course_name": "CS101",
        "day": "Monday",
        "period": period,
        "subject_name": subject,
        "teacher_name": "Dr. A",
        "classroom": "Room 5"
    })
}

#[tokio::test]
async fn timetable_lifecycle_via_http_api() {
    let app = new_router();

    let (status, body) = post_json(&app, "/add_course", json!({ "course_name": "CS101" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Course added successfully"));
    assert_eq!(body["data"]["course_name"], json!("CS101"));
    let course_id = body["data"]["course_id"].clone();

    let (status, body) = post_json(&app, "/add_timetable_entry", cs101_monday(2, "Compilers")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["course_id"], course_id);
    let (status, _) = post_json(&app, "/add_timetable_entry", cs101_monday(1, "Algorithms")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        "/get_timetable",
        json!({ "course_name": "CS101", "day": "Monday" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Timetable retrieved successfully"));
    let periods: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["period"].as_i64().unwrap())
        .collect();
    assert_eq!(periods, vec![1, 2]);

    let mut update = cs101_monday(2, "Networks");
    update["classroom"] = json!("Lab 3");
    let (status, body) = post_json(&app, "/update_timetable_entry", update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["subject_name"], json!("Networks"));
    assert_eq!(body["data"][0]["classroom"], json!("Lab 3"));

    let (status, body) = post_json(
        &app,
        "/delete_timetable",
        json!({ "course_name": "CS101", "day": "Monday", "period": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["subject_name"], json!("Algorithms"));

    let (status, body) = post_empty(&app, "/get_all_timetables").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("All timetables retrieved successfully"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = post_empty(&app, "/get_all_courses").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([{ "course_id": course_id, "course_name": "CS101" }]));
}

#[tokio::test]
async fn get_timetable_for_unknown_course_is_empty_list() {
    let app = new_router();
    let (status, body) = post_json(
        &app,
        "/get_timetable",
        json!({ "course_name": "NOPE", "day": "Monday" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn writes_for_unknown_course_return_not_found() {
    let app = new_router();

    let (status, body) = post_json(&app, "/add_timetable_entry", cs101_monday(1, "Algorithms")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("course_not_found"));
    assert_eq!(body["message"], json!("Course 'CS101' not found"));

    let (status, _) = post_json(&app, "/update_timetable_entry", cs101_monday(1, "Algorithms")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(
        &app,
        "/delete_timetable",
        json!({ "course_name": "CS101", "day": "Monday", "period": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_of_missing_slot_return_empty_data() {
    let app = new_router();
    post_json(&app, "/add_course", json!({ "course_name": "CS101" })).await;

    let (status, body) = post_json(&app, "/update_timetable_entry", cs101_monday(5, "Ghost")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = post_json(
        &app,
        "/delete_timetable",
        json!({ "course_name": "CS101", "day": "Monday", "period": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (_, body) = post_empty(&app, "/get_all_timetables").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn duplicate_course_returns_internal_error_with_store_message() {
    let app = new_router();
    let (status, _) = post_json(&app, "/add_course", json!({ "course_name": "CS101" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/add_course", json!({ "course_name": "CS101" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("internal_error"));
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("already exists")
    );
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = new_router();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], json!(http_api::WELCOME_MESSAGE));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_against_file_store_all_land() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = SqliteRecordStore::new(file.path()).unwrap();
    let app = http_api::router(http_api::AppState::new(TimetableManager::from_store(store)));
    post_json(&app, "/add_course", json!({ "course_name": "CS101" })).await;

    let mut handles = Vec::new();
    for period in 1..=8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post_json(&app, "/add_timetable_entry", cs101_monday(period, "Lecture")).await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = post_json(
        &app,
        "/get_timetable",
        json!({ "course_name": "CS101", "day": "Monday" }),
    )
    .await;
    let periods: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["period"].as_i64().unwrap())
        .collect();
    assert_eq!(periods, (1..=8).collect::<Vec<i64>>());
}
