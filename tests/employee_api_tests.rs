mod common;

use axum::{body::Body, http::Request};
use common::{body_json, spawn_app};
use serde_json::json;
use staffdesk::test_utils::test_helpers;

#[tokio::test]
async fn test_api_create_and_fetch_employee() {
    let app = spawn_app().await;

    let response = app
        .send_json(
            "POST",
            "/api/employees",
            json!({"name": "Mia", "email": "mia@example.com", "salary": 4200}),
        )
        .await;
    assert_eq!(response.status(), 201);

    let created = body_json(response).await;
    assert_eq!(created["name"], "Mia");
    assert_eq!(created["status"], "Active");
    assert_eq!(created["salary"], 4200.0);
    let id = created["id"].as_i64().unwrap();

    let response = app.get(&format!("/api/employees/{}", id), None).await;
    assert_eq!(response.status(), 200);
    let fetched = body_json(response).await;
    assert_eq!(fetched["email"], "mia@example.com");
}

#[tokio::test]
async fn test_api_list_employees() {
    let app = spawn_app().await;
    test_helpers::insert_test_employee(&app.pool, "A", "a@example.com")
        .await
        .unwrap();
    test_helpers::insert_test_employee(&app.pool, "B", "b@example.com")
        .await
        .unwrap();

    let response = app.get("/api/employees", None).await;
    assert_eq!(response.status(), 200);

    let list = body_json(response).await;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_api_list_employees_newest_first() {
    let app = spawn_app().await;
    let older = test_helpers::insert_test_employee(&app.pool, "A", "a@example.com")
        .await
        .unwrap();
    let newer = test_helpers::insert_test_employee(&app.pool, "B", "b@example.com")
        .await
        .unwrap();

    let list = body_json(app.get("/api/employees", None).await).await;
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![newer, older]);
}

#[tokio::test]
async fn test_api_get_missing_employee_is_404() {
    let app = spawn_app().await;

    let response = app.get("/api/employees/42", None).await;
    assert_eq!(response.status(), 404);
    assert_eq!(body_json(response).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_api_create_duplicate_email_is_400() {
    let app = spawn_app().await;
    test_helpers::insert_test_employee(&app.pool, "A", "a@example.com")
        .await
        .unwrap();

    let response = app
        .send_json(
            "POST",
            "/api/employees",
            json!({"name": "Other", "email": "a@example.com"}),
        )
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Could not create employee"})
    );
}

#[tokio::test]
async fn test_api_create_missing_name_is_400() {
    let app = spawn_app().await;

    let response = app
        .send_json("POST", "/api/employees", json!({"email": "n@example.com"}))
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Name is required"})
    );
}

#[tokio::test]
async fn test_api_update_unknown_id_still_succeeds() {
    let app = spawn_app().await;

    let response = app
        .send_json(
            "PUT",
            "/api/employees/77",
            json!({"name": "Ghost", "email": "ghost@example.com"}),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["id"], 77);

    let count = test_helpers::count_rows(&app.pool, "employees").await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_api_delete_missing_employee_is_204() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/employees/12345")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), 204);
}
