mod common;

use common::{body_string, location, spawn_app};
use staffdesk::test_utils::test_helpers;

#[tokio::test]
async fn test_list_employees_shows_rows() {
    let app = spawn_app().await;
    test_helpers::insert_test_employee(&app.pool, "Ana Lopez", "ana@example.com")
        .await
        .unwrap();

    let response = app.get("/employees", None).await;
    assert_eq!(response.status(), 200);

    let body = body_string(response).await;
    assert!(body.contains("Ana Lopez"));
    assert!(body.contains("ana@example.com"));
}

#[tokio::test]
async fn test_list_employees_newest_first() {
    let app = spawn_app().await;
    test_helpers::insert_test_employee(&app.pool, "Older Hire", "older@example.com")
        .await
        .unwrap();
    test_helpers::insert_test_employee(&app.pool, "Newer Hire", "newer@example.com")
        .await
        .unwrap();

    let body = body_string(app.get("/employees", None).await).await;
    let newer = body.find("Newer Hire").unwrap();
    let older = body.find("Older Hire").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn test_create_employee_defaults_status_to_active() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/employees",
            "name=Raj&email=raj%40example.com&department=QA&salary=&status=",
            None,
        )
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/employees"));

    let (status, salary): (String, Option<f64>) =
        sqlx::query_as("SELECT status, salary FROM employees WHERE email = ?")
            .bind("raj@example.com")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(status, "Active");
    assert_eq!(salary, None);
}

#[tokio::test]
async fn test_create_employee_duplicate_email_rerenders_form() {
    let app = spawn_app().await;
    test_helpers::insert_test_employee(&app.pool, "First", "dup@example.com")
        .await
        .unwrap();

    let response = app
        .post_form("/employees", "name=Second&email=dup%40example.com", None)
        .await;
    assert_eq!(response.status(), 400);

    let body = body_string(response).await;
    assert!(body.contains("Could not create employee (maybe duplicate email)."));
    // Submitted values are echoed back
    assert!(body.contains("value=\"Second\""));

    let count = test_helpers::count_rows(&app.pool, "employees").await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_create_employee_requires_name() {
    let app = spawn_app().await;

    let response = app
        .post_form("/employees", "name=&email=x%40example.com", None)
        .await;
    assert_eq!(response.status(), 400);
    assert!(body_string(response).await.contains("Name is required"));
}

#[tokio::test]
async fn test_edit_missing_employee_is_404() {
    let app = spawn_app().await;

    let response = app.get("/employees/999/edit", None).await;
    assert_eq!(response.status(), 404);
    assert_eq!(body_string(response).await, "Employee not found");
}

#[tokio::test]
async fn test_update_employee_replaces_all_fields() {
    let app = spawn_app().await;
    let id = test_helpers::insert_test_employee(&app.pool, "Old", "old@example.com")
        .await
        .unwrap();

    let response = app
        .post_form(
            &format!("/employees/{}", id),
            "name=New&email=new%40example.com&department=Ops&salary=5000&status=Inactive",
            None,
        )
        .await;
    assert_eq!(response.status(), 303);

    let row: (String, String, Option<String>, Option<f64>, String) = sqlx::query_as(
        "SELECT name, email, department, salary, status FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(
        row,
        (
            "New".to_string(),
            "new@example.com".to_string(),
            Some("Ops".to_string()),
            Some(5000.0),
            "Inactive".to_string()
        )
    );
}

#[tokio::test]
async fn test_delete_employee_redirects_to_list() {
    let app = spawn_app().await;
    let id = test_helpers::insert_test_employee(&app.pool, "Gone", "gone@example.com")
        .await
        .unwrap();

    let response = app
        .post_form(&format!("/employees/{}/delete", id), "", None)
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/employees"));

    let count = test_helpers::count_rows(&app.pool, "employees").await.unwrap();
    assert_eq!(count, 0);
}
