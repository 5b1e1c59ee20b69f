//! Customer and trainer API integration tests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use crate::common::*;

fn end_of(body: &Value) -> DateTime<Utc> {
    body["membershipEnd"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_front_desk_registers_customer_with_plan() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let coach = trainer(&app, "coach@gym.test").await;

    let (status, body) = app
        .post(
            "/api/users/customers",
            &desk.token,
            json!({
                "email": "linh@gym.test",
                "password": "secret1",
                "fullName": "Linh Tran",
                "phone": "0901 111 222",
                "plan": "annual",
                "trainerId": coach.id
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["membershipType"], "annual");
    assert_eq!(body["status"], "active");
    assert_eq!(body["trainerId"], coach.id.to_string());
    assert!(end_of(&body) > Utc::now() + Duration::days(360));

    let (status, mine) = app.get("/api/users/my-customers", &coach.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_customer_list_filters_and_permissions() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let anna = customer(&app, "anna@gym.test").await;
    customer(&app, "bao@gym.test").await;

    let (_, all) = app.get("/api/users/customers", &desk.token).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, found) = app.get("/api/users/customers?q=ANNA", &desk.token).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], anna.id.to_string());

    let (_, wildcard) = app.get("/api/users/customers?q=_", &desk.token).await;
    assert!(wildcard.as_array().unwrap().is_empty(), "{wildcard}");
    let (_, wildcard) = app.get("/api/users/customers?q=%25", &desk.token).await;
    assert!(wildcard.as_array().unwrap().is_empty(), "{wildcard}");

    let (_, expired) = app.get("/api/users/customers?status=expired", &desk.token).await;
    assert!(expired.as_array().unwrap().is_empty());

    assert_error(app.get("/api/users/customers", &anna.token).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_sees_self_but_not_others() {
    let app = TestApp::new().await;
    let anna = customer(&app, "anna@gym.test").await;
    let bao = customer(&app, "bao@gym.test").await;

    let (status, _) = app.get(&format!("/api/users/customers/{}", anna.id), &anna.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_error(
        app.get(&format!("/api/users/customers/{}", bao.id), &anna.token).await,
        StatusCode::FORBIDDEN,
    );
}

#[tokio::test]
async fn test_renew_extends_running_membership() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;

    let (_, created) = app
        .post(
            "/api/users/customers",
            &desk.token,
            json!({"email": "m@gym.test", "password": "secret1", "fullName": "M", "plan": "monthly"}),
        )
        .await;
    let id = created["id"].as_str().unwrap().to_string();
    let first_end = end_of(&created);

    let (status, renewed) = app
        .post(&format!("/api/users/customers/{id}/renew"), &desk.token, json!({"plan": "quarterly"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renewed["membershipType"], "quarterly");
    assert_eq!(renewed["membershipStart"], created["membershipStart"]);
    assert!(end_of(&renewed) >= first_end + Duration::days(89));
}

#[tokio::test]
async fn test_renew_rejects_unknown_plan_and_bad_ids() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let member = customer(&app, "member@gym.test").await;

    let weekly = app
        .post(&format!("/api/users/customers/{}/renew", member.id), &desk.token, json!({"plan": "weekly"}))
        .await;
    let body = assert_error(weekly, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("weekly"), "body: {body}");

    let (_, unchanged) = app.get(&format!("/api/users/customers/{}", member.id), &desk.token).await;
    assert!(unchanged["membershipType"].is_null());

    let bad_id = app
        .post("/api/users/customers/not-a-uuid/renew", &desk.token, json!({"plan": "monthly"}))
        .await;
    assert_error(bad_id, StatusCode::BAD_REQUEST);

    let bad_query = app.get("/api/users/customers?status=sleeping", &desk.token).await;
    assert_error(bad_query, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_membership_end_moves_status() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let member = customer(&app, "member@gym.test").await;
    let uri = format!("/api/users/customers/{}", member.id);

    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    let (_, body) = app.put(&uri, &desk.token, json!({"membershipEnd": past})).await;
    assert_eq!(body["status"], "expired");

    let future = (Utc::now() + Duration::days(30)).to_rfc3339();
    let (_, body) = app
        .put(&uri, &desk.token, json!({"membershipEnd": future, "address": "7 Pasteur"}))
        .await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["address"], "7 Pasteur");
}

#[tokio::test]
async fn test_status_and_trainer_assignment() {
    let app = TestApp::new().await;
    let desk = receptionist(&app).await;
    let coach = trainer(&app, "coach@gym.test").await;
    let member = customer(&app, "member@gym.test").await;
    let base = format!("/api/users/customers/{}", member.id);

    let (_, body) = app.put(&format!("{base}/trainer"), &desk.token, json!({"trainerId": coach.id})).await;
    assert_eq!(body["trainerId"], coach.id.to_string());

    let not_trainer = app
        .put(&format!("{base}/trainer"), &desk.token, json!({"trainerId": desk.id}))
        .await;
    assert_field_error(not_trainer, "trainerId");

    let (_, body) = app.put(&format!("{base}/trainer"), &desk.token, json!({"trainerId": null})).await;
    assert!(body["trainerId"].is_null());

    let (_, body) = app.put(&format!("{base}/status"), &desk.token, json!({"status": "inactive"})).await;
    assert_eq!(body["status"], "inactive");
}

#[tokio::test]
async fn test_only_admin_deletes_customers() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let desk = receptionist(&app).await;
    let member = customer(&app, "member@gym.test").await;
    let uri = format!("/api/users/customers/{}", member.id);

    assert_error(app.delete(&uri, &desk.token).await, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&uri, &boss.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_error(app.get(&uri, &boss.token).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_account_loses_its_avatar() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let member = customer(&app, "member@gym.test").await;
    let avatar = app.uploads.path().join(format!("avatars/{}.jpg", member.id));

    let (content_type, body) = multipart_image("image", "me.jpg", b"\xFF\xD8\xFF fake jpeg");
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/me/avatar")
        .header(header::AUTHORIZATION, format!("Bearer {}", member.token))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(avatar.exists());

    let (status, _) = app.delete(&format!("/api/users/customers/{}", member.id), &boss.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!avatar.exists());
}

#[tokio::test]
async fn test_trainer_crud_and_cascade() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let desk = receptionist(&app).await;
    let member = customer(&app, "member@gym.test").await;

    let (status, coach) = app
        .post(
            "/api/users/trainers",
            &desk.token,
            json!({
                "email": "coach@gym.test",
                "password": "secret1",
                "fullName": "Coach Nam",
                "specialization": "Strength"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(coach["role"], "trainer");
    let coach_id = coach["id"].as_str().unwrap().to_string();

    // Everyone signed in can browse trainers.
    let (_, list) = app.get("/api/users/trainers", &member.token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (_, updated) = app
        .put(&format!("/api/users/trainers/{coach_id}"), &desk.token, json!({"specialization": "Yoga"}))
        .await;
    assert_eq!(updated["specialization"], "Yoga");

    app.put(
        &format!("/api/users/customers/{}/trainer", member.id),
        &desk.token,
        json!({"trainerId": coach_id}),
    )
    .await;
    app.put(
        &format!("/api/schedules/{coach_id}"),
        &desk.token,
        json!({"items": [{"day": "Monday", "startTime": "08:00", "endTime": "10:00"}]}),
    )
    .await;

    assert_error(
        app.delete(&format!("/api/users/trainers/{coach_id}"), &desk.token).await,
        StatusCode::FORBIDDEN,
    );
    let (status, _) = app.delete(&format!("/api/users/trainers/{coach_id}"), &boss.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get(&format!("/api/users/customers/{}", member.id), &boss.token).await;
    assert!(body["trainerId"].is_null());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schedule_items")
        .fetch_one(&app.state.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_check_expired_endpoint() {
    let app = TestApp::new().await;
    let boss = admin(&app).await;
    let desk = receptionist(&app).await;

    let (_, lapsed) = app
        .post(
            "/api/users/customers",
            &desk.token,
            json!({"email": "late@gym.test", "password": "secret1", "fullName": "Late"}),
        )
        .await;
    let id = lapsed["id"].as_str().unwrap().to_string();
    // Back-date the end without going through the status rules.
    sqlx::query("UPDATE users SET membership_end = ? WHERE email = ?")
        .bind(Utc::now() - Duration::days(1))
        .bind("late@gym.test")
        .execute(&app.state.db_pool)
        .await
        .unwrap();

    assert_error(
        app.post("/api/users/check-expired", &desk.token, json!({})).await,
        StatusCode::FORBIDDEN,
    );

    let (status, body) = app.post("/api/users/check-expired", &boss.token, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expired"], 1);
    assert_eq!(body["ids"][0], id);

    let (_, customer) = app.get(&format!("/api/users/customers/{id}"), &desk.token).await;
    assert_eq!(customer["status"], "expired");
}
