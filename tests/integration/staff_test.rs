//! Staff administration integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_admin_manages_receptionists() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;

    let (status, created) = app
        .post(
            "/api/staff",
            &boss.token,
            json!({"email": "front@gym.test", "password": "secret1", "fullName": "Front Desk"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["role"], "receptionist");
    let uri = format!("/api/staff/{}", created["id"].as_str().unwrap());

    let (_, list) = app.get("/api/staff", &boss.token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (_, updated) = app.put(&uri, &boss.token, json!({"phone": "0283 999"})).await;
    assert_eq!(updated["phone"], "0283 999");

    // The new account can sign in straight away.
    let (status, _) = app
        .request(
            axum::http::Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "front@gym.test", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&uri, &boss.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_error(app.get(&uri, &boss.token).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_staff_role_rules() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;

    let (status, coach) = app
        .post(
            "/api/staff",
            &boss.token,
            json!({"email": "coach@gym.test", "password": "secret1", "fullName": "Coach", "role": "trainer"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(coach["role"], "trainer");

    let (_, trainers) = app.get("/api/staff?role=trainer", &boss.token).await;
    assert_eq!(trainers.as_array().unwrap().len(), 1);

    let another_admin = app
        .post(
            "/api/staff",
            &boss.token,
            json!({"email": "root@gym.test", "password": "secret1", "fullName": "Root", "role": "admin"}),
        )
        .await;
    assert_field_error(another_admin, "role");

    assert_field_error(app.get("/api/staff?role=customer", &boss.token).await, "role");
}

#[tokio::test]
async fn test_staff_routes_are_admin_only() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let coach = trainer(&app, "coach@gym.test").await;

    for user in [&desk, &coach] {
        assert_error(app.get("/api/staff", &user.token).await, StatusCode::FORBIDDEN);
        assert_error(
            app.post(
                "/api/staff",
                &user.token,
                json!({"email": "x@gym.test", "password": "secret1", "fullName": "X"}),
            )
            .await,
            StatusCode::FORBIDDEN,
        );
    }
}

#[tokio::test]
async fn test_customers_are_not_staff() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let member = customer(&app, "member@gym.test").await;

    assert_error(
        app.get(&format!("/api/staff/{}", member.id), &boss.token).await,
        StatusCode::NOT_FOUND,
    );
    assert_error(
        app.delete(&format!("/api/staff/{}", member.id), &boss.token).await,
        StatusCode::NOT_FOUND,
    );
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    assert_error(
        app.delete(&format!("/api/staff/{}", boss.id), &boss.token).await,
        StatusCode::BAD_REQUEST,
    );
}

#[tokio::test]
async fn test_duplicate_staff_email_conflicts() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let desk = receptionist(&app).await;

    let (status, _) = app
        .post(
            "/api/staff",
            &boss.token,
            json!({"email": desk.email, "password": "secret1", "fullName": "Twin"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
