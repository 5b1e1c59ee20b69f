//! Equipment API integration tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use family_gym::backend::uploads::MAX_UPLOAD_BYTES;
use serde_json::{json, Value};

use crate::common::*;

fn image_upload(uri: &str, token: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let (content_type, body) = multipart_image("image", file_name, bytes);
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

async fn add_machine(app: &TestApp, token: &str, name: &str, category: &str) -> Value {
    let (status, body) = app
        .post(
            "/api/equipment",
            token,
            json!({"name": name, "category": category, "price": 1200.5, "location": "Floor 1"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn test_equipment_lifecycle() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let desk = receptionist(&app).await;

    let machine = add_machine(&app, &boss.token, "Treadmill T5", "Cardio").await;
    assert_eq!(machine["status"], "available");
    let uri = format!("/api/equipment/{}", machine["id"].as_str().unwrap());

    let (_, fetched) = app.get(&uri, &desk.token).await;
    assert_eq!(fetched["name"], "Treadmill T5");

    let (status, updated) = app.put(&uri, &desk.token, json!({"status": "broken", "notes": "Belt torn"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "broken");
    assert_eq!(updated["notes"], "Belt torn");
    assert_eq!(updated["name"], "Treadmill T5");

    assert_error(app.delete(&uri, &desk.token).await, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&uri, &boss.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_error(app.get(&uri, &boss.token).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_equipment_filters() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    add_machine(&app, &boss.token, "Treadmill", "Cardio").await;
    add_machine(&app, &boss.token, "Rower", "cardio").await;
    let rack = add_machine(&app, &boss.token, "Squat rack", "Strength").await;
    app.put(
        &format!("/api/equipment/{}", rack["id"].as_str().unwrap()),
        &boss.token,
        json!({"status": "in_use"}),
    )
    .await;

    let (_, cardio) = app.get("/api/equipment?category=CARDIO", &boss.token).await;
    assert_eq!(cardio.as_array().unwrap().len(), 2);

    let (_, busy) = app.get("/api/equipment?status=in_use", &boss.token).await;
    assert_eq!(busy.as_array().unwrap().len(), 1);
    assert_eq!(busy[0]["name"], "Squat rack");
}

#[tokio::test]
async fn test_equipment_permissions_and_validation() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let coach = trainer(&app, "coach@gym.test").await;
    let boss = admin(&app).await;

    assert_error(
        app.post("/api/equipment", &desk.token, json!({"name": "Bike", "category": "Cardio"})).await,
        StatusCode::FORBIDDEN,
    );
    assert_error(app.get("/api/equipment", &coach.token).await, StatusCode::FORBIDDEN);

    let invalid = app
        .post("/api/equipment", &boss.token, json!({"name": " ", "category": "Cardio", "price": -3}))
        .await;
    assert_field_error(invalid.clone(), "name");
    assert_field_error(invalid, "price");
}

#[tokio::test]
async fn test_equipment_image_upload() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let machine = add_machine(&app, &boss.token, "Bike", "Cardio").await;
    let id = machine["id"].as_str().unwrap();

    let request = image_upload(&format!("/api/equipment/{id}/image"), &boss.token, "bike.jpg", b"\xFF\xD8\xFF fake jpeg");
    let (status, updated) = app.send(request).await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["imageUrl"], format!("/uploads/equipment/{id}.jpg"));
    assert!(app.uploads.path().join(format!("equipment/{id}.jpg")).exists());
}

#[tokio::test]
async fn test_equipment_image_size_cap() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let machine = add_machine(&app, &boss.token, "Bike", "Cardio").await;
    let uri = format!("/api/equipment/{}/image", machine["id"].as_str().unwrap());

    let too_big = vec![0u8; MAX_UPLOAD_BYTES + 1];
    assert_field_error(app.send(image_upload(&uri, &boss.token, "bike.png", &too_big)).await, "image");

    let at_cap = vec![0u8; MAX_UPLOAD_BYTES];
    let (status, _) = app.send(image_upload(&uri, &boss.token, "bike.png", &at_cap)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleting_equipment_removes_its_image() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let machine = add_machine(&app, &boss.token, "Bike", "Cardio").await;
    let id = machine["id"].as_str().unwrap();
    let stored = app.uploads.path().join(format!("equipment/{id}.webp"));

    let upload = image_upload(&format!("/api/equipment/{id}/image"), &boss.token, "bike.webp", b"RIFF fake webp");
    let (status, _) = app.send(upload).await;
    assert_eq!(status, StatusCode::OK);
    assert!(stored.exists());

    let (status, _) = app.delete(&format!("/api/equipment/{id}"), &boss.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!stored.exists());
}

#[tokio::test]
async fn test_equipment_maintenance_history() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let machine = add_machine(&app, &boss.token, "Bike", "Cardio").await;
    let id = machine["id"].as_str().unwrap();

    for (description, date) in [("Oil chain", "2025-01-10"), ("Replace pedals", "2025-03-02")] {
        app.post(
            "/api/maintenance",
            &boss.token,
            json!({"equipmentId": id, "description": description, "scheduledDate": date}),
        )
        .await;
    }

    let (status, history) = app.get(&format!("/api/equipment/{id}/maintenance"), &boss.token).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["description"], "Replace pedals");
}
