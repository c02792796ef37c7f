mod common;

use common::{body_string, location, spawn_app};
use staffdesk::test_utils::test_helpers;

#[tokio::test]
async fn test_create_profile_joins_skills() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/employee/create",
            "first_name=Ana&last_name=Lopez&email=ana%40example.com&mobile=9876543210\
             &gender=Female&country=India&city=Pune&skills=AWS&skills=DevOps",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    assert!(body_string(response)
        .await
        .contains("Employee saved successfully."));

    let (skills, country): (String, Option<String>) =
        sqlx::query_as("SELECT skills, country FROM employee_profiles WHERE email = ?")
            .bind("ana@example.com")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(skills, "AWS,DevOps");
    assert_eq!(country.as_deref(), Some("India"));
}

#[tokio::test]
async fn test_create_profile_reports_every_missing_field() {
    let app = spawn_app().await;

    let response = app
        .post_form("/employee/create", "first_name=&email=&skills=AWS", None)
        .await;
    assert_eq!(response.status(), 400);

    let body = body_string(response).await;
    assert!(body.contains("First Name is required"));
    assert!(body.contains("Email is required"));
    // The ticked skill stays ticked on re-render
    assert!(body.contains("value=\"AWS\" checked"));

    let count = test_helpers::count_rows(&app.pool, "employee_profiles")
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive_substring() {
    let app = spawn_app().await;
    test_helpers::insert_test_profile(&app.pool, "Ana", "ana@example.com", Some("111"))
        .await
        .unwrap();
    test_helpers::insert_test_profile(&app.pool, "Diana", "diana@example.com", Some("222"))
        .await
        .unwrap();
    test_helpers::insert_test_profile(&app.pool, "Bob", "bob@example.com", Some("111"))
        .await
        .unwrap();

    let response = app.get("/employee/search?name=ana", None).await;
    assert_eq!(response.status(), 200);

    let body = body_string(response).await;
    assert!(body.contains("ana@example.com"));
    assert!(body.contains("diana@example.com"));
    assert!(!body.contains("bob@example.com"));
}

#[tokio::test]
async fn test_search_filters_combine_with_and() {
    let app = spawn_app().await;
    test_helpers::insert_test_profile(&app.pool, "Ana", "ana@example.com", Some("111"))
        .await
        .unwrap();
    test_helpers::insert_test_profile(&app.pool, "Diana", "diana@example.com", Some("222"))
        .await
        .unwrap();

    let response = app.get("/employee/search?name=ana&mobile=22", None).await;
    let body = body_string(response).await;
    assert!(body.contains("diana@example.com"));
    assert!(!body.contains(">ana@example.com<"));
}

#[tokio::test]
async fn test_search_results_newest_first() {
    let app = spawn_app().await;
    test_helpers::insert_test_profile(&app.pool, "Carla", "older@example.com", None)
        .await
        .unwrap();
    test_helpers::insert_test_profile(&app.pool, "Marta", "newer@example.com", None)
        .await
        .unwrap();

    let body = body_string(app.get("/employee/search?name=ar", None).await).await;
    let newer = body.find("newer@example.com").unwrap();
    let older = body.find("older@example.com").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn test_search_post_redirects_to_query() {
    let app = spawn_app().await;

    let response = app
        .post_form("/employee/search", "name=Ana+Maria&mobile=", None)
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(
        location(&response).as_deref(),
        Some("/employee/search?name=Ana+Maria&mobile=")
    );
}

#[tokio::test]
async fn test_edit_profile_round_trips_through_form() {
    let app = spawn_app().await;
    let id = test_helpers::insert_test_profile(&app.pool, "Ana", "ana@example.com", None)
        .await
        .unwrap();

    let response = app.get(&format!("/employee/{}/edit", id), None).await;
    assert_eq!(response.status(), 200);
    assert!(body_string(response).await.contains("value=\"Ana\""));

    let response = app
        .post_form(
            &format!("/employee/{}/edit", id),
            "first_name=Anabel&email=anabel%40example.com&skills=Middleware",
            None,
        )
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/employee/search"));

    let (first_name, skills): (String, String) =
        sqlx::query_as("SELECT first_name, skills FROM employee_profiles WHERE id = ?")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(first_name, "Anabel");
    assert_eq!(skills, "Middleware");
}

#[tokio::test]
async fn test_edit_missing_profile_is_404() {
    let app = spawn_app().await;

    let response = app.get("/employee/404/edit", None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_profile() {
    let app = spawn_app().await;
    let id = test_helpers::insert_test_profile(&app.pool, "Ana", "ana@example.com", None)
        .await
        .unwrap();

    let response = app
        .post_form(&format!("/employee/{}/delete", id), "", None)
        .await;
    assert_eq!(response.status(), 303);

    let count = test_helpers::count_rows(&app.pool, "employee_profiles")
        .await
        .unwrap();
    assert_eq!(count, 0);
}
