//! Trainer schedule integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_trainer_builds_own_week() {
    let app = TestApp::new().await;
    let coach = trainer(&app, "coach@gym.test").await;
    let uri = format!("/api/schedules/{}", coach.id);

    let (status, item) = app
        .post(&uri, &coach.token, json!({"day": "Wednesday", "startTime": "17:00", "endTime": "19:00"}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{item}");
    app.post(&uri, &coach.token, json!({"day": "monday", "startTime": "06:30", "endTime": "08:00", "note": "Spin"}))
        .await;

    let (status, week) = app.get("/api/schedules/me", &coach.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(week["trainerId"], coach.id.to_string());
    assert_eq!(week["weeklyMinutes"], 210);
    assert_eq!(week["items"][0]["day"], "Monday");
    assert_eq!(week["items"][0]["note"], "Spin");
    assert_eq!(week["items"][1]["day"], "Wednesday");
}

#[tokio::test]
async fn test_overlapping_item_is_conflict() {
    let app = TestApp::new().await;
    let coach = trainer(&app, "coach@gym.test").await;
    let uri = format!("/api/schedules/{}", coach.id);

    app.post(&uri, &coach.token, json!({"day": "Monday", "startTime": "08:00", "endTime": "10:00"}))
        .await;
    let body = assert_error(
        app.post(&uri, &coach.token, json!({"day": "Monday", "startTime": "09:30", "endTime": "11:00"}))
            .await,
        StatusCode::CONFLICT,
    );
    assert_eq!(body["error"], "Overlaps Monday 08:00-10:00");

    // Back-to-back slots are fine.
    let (status, _) = app
        .post(&uri, &coach.token, json!({"day": "Monday", "startTime": "10:00", "endTime": "11:00"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_item_reports_fields() {
    let app = TestApp::new().await;
    let coach = trainer(&app, "coach@gym.test").await;
    let uri = format!("/api/schedules/{}", coach.id);

    let bad = app
        .post(&uri, &coach.token, json!({"day": "Funday", "startTime": "9:00", "endTime": "08:00"}))
        .await;
    let body = assert_error(bad, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["day"].is_string());
    assert!(body["errors"]["startTime"].is_string());

    let reversed = app
        .post(&uri, &coach.token, json!({"day": "Friday", "startTime": "10:00", "endTime": "09:00"}))
        .await;
    assert_field_error(reversed, "endTime");
}

#[tokio::test]
async fn test_replace_week() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let coach = trainer(&app, "coach@gym.test").await;
    let uri = format!("/api/schedules/{}", coach.id);

    app.post(&uri, &coach.token, json!({"day": "Sunday", "startTime": "10:00", "endTime": "12:00"}))
        .await;

    let (status, week) = app
        .put(
            &uri,
            &desk.token,
            json!({"items": [
                {"day": "Friday", "startTime": "18:00", "endTime": "20:00"},
                {"day": "Tuesday", "startTime": "07:00", "endTime": "09:00"}
            ]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{week}");
    let items = week["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["day"], "Tuesday");
    assert_eq!(items[1]["day"], "Friday");

    let overlapping = app
        .put(
            &uri,
            &desk.token,
            json!({"items": [
                {"day": "Friday", "startTime": "18:00", "endTime": "20:00"},
                {"day": "Friday", "startTime": "19:00", "endTime": "21:00"}
            ]}),
        )
        .await;
    assert_field_error(overlapping, "items[1].startTime");

    // The rejected week left the stored one untouched.
    let (_, week) = app.get(&uri, &coach.token).await;
    assert_eq!(week["items"].as_array().unwrap().len(), 2);

    let (_, week) = app.put(&uri, &desk.token, json!({"items": []})).await;
    assert!(week["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_permissions() {
    let app = TestApp::new().await;
    let coach = trainer(&app, "coach@gym.test").await;
    let other = trainer(&app, "other@gym.test").await;
    let member = customer(&app, "member@gym.test").await;
    let uri = format!("/api/schedules/{}", coach.id);
    let slot = json!({"day": "Monday", "startTime": "08:00", "endTime": "09:00"});

    assert_error(app.post(&uri, &other.token, slot.clone()).await, StatusCode::FORBIDDEN);
    assert_error(app.post(&uri, &member.token, slot).await, StatusCode::FORBIDDEN);
    assert_error(app.get("/api/schedules/me", &member.token).await, StatusCode::FORBIDDEN);

    // Anyone signed in may read a trainer's week.
    let (status, _) = app.get(&uri, &member.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_error(
        app.get(&format!("/api/schedules/{}", member.id), &member.token).await,
        StatusCode::NOT_FOUND,
    );
}

#[tokio::test]
async fn test_delete_item() {
    let app = TestApp::new().await;
    let coach = trainer(&app, "coach@gym.test").await;
    let uri = format!("/api/schedules/{}", coach.id);

    let (_, item) = app
        .post(&uri, &coach.token, json!({"day": "Thursday", "startTime": "12:00", "endTime": "13:00"}))
        .await;
    let item_uri = format!("{uri}/items/{}", item["id"].as_str().unwrap());

    let (status, _) = app.delete(&item_uri, &coach.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_error(app.delete(&item_uri, &coach.token).await, StatusCode::NOT_FOUND);
}
