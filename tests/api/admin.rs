use crate::helpers::{self, assert_error};
use serde_json::Value;
use uuid::Uuid;

fn valid_post() -> Value {
    serde_json::json!({
        "title": "Shipping Rust services",
        "content": "Build, test, deploy.",
        "coverImageUrl": "https://example.com/cover.png",
        "tags": ["Rust", "ops", "rust"],
        "generatedByAI": true,
    })
}

// ============================================================================
// Create Post
// ============================================================================

#[tokio::test]
async fn create_post_returns_201_with_the_stored_post() {
    let app = helpers::spawn_app().await;
    app.login_as(&app.admin);

    let response = app.create_post(&valid_post()).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Shipping Rust services");
    assert_eq!(body["slug"], "shipping-rust-services");
    assert_eq!(body["tags"], serde_json::json!(["rust", "ops"]));
    assert_eq!(body["isDraft"], false);
    assert_eq!(body["generatedByAI"], true);
    assert_eq!(body["views"], 0);
    assert_eq!(body["likes"], 0);
    assert_eq!(body["author"]["id"], app.admin.user_id.to_string());
}

#[tokio::test]
async fn create_post_returns_409_for_a_taken_slug() {
    let app = helpers::spawn_app().await;
    app.login_as(&app.admin);
    assert_eq!(app.create_post(&valid_post()).await.status().as_u16(), 201);

    let mut clash = valid_post();
    clash["title"] = "shipping rust services".into();

    assert_error(app.create_post(&clash).await, 409).await;
}

#[tokio::test]
async fn create_post_returns_400_for_invalid_input() {
    let app = helpers::spawn_app().await;
    app.login_as(&app.admin);

    let test_cases = vec![
        (serde_json::json!({ "title": "", "content": "Body" }), "empty title"),
        (serde_json::json!({ "title": "1234", "content": "Body" }), "numeric title"),
        (serde_json::json!({ "title": "Title", "content": "" }), "empty content"),
        (
            serde_json::json!({ "title": "Title", "content": "Body", "coverImageUrl": "ftp://x" }),
            "bad cover url",
        ),
        (serde_json::json!({ "title": "!!!", "content": "Body" }), "title without a slug"),
        (serde_json::json!({ "content": "Body" }), "missing title"),
    ];

    for (payload, description) in test_cases {
        let response = app.create_post(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Expected 400 for {description}"
        );
    }
}

#[tokio::test]
async fn admin_routes_reject_members_and_anonymous_users() {
    let app = helpers::spawn_app().await;

    app.login_as(&app.member);
    let message = assert_error(app.create_post(&valid_post()).await, 403).await;
    assert_eq!(message, "Admin privileges required");

    app.logout();
    assert_error(app.create_post(&valid_post()).await, 401).await;
    assert_error(app.admin_posts("status=all").await, 401).await;
}

// ============================================================================
// Update Post
// ============================================================================

#[tokio::test]
async fn update_post_changes_only_the_given_fields() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post_custom("Original title", false).await;

    let response = app
        .update_post(&post_id, &serde_json::json!({ "title": "Renamed title" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Renamed title");
    assert_eq!(body["slug"], "renamed-title");
    assert_eq!(body["content"], "All about Original title");
    assert_eq!(body["tags"], serde_json::json!(["rust", "backend"]));

    let response = app.send_get("v1/post/get/slug/renamed-title").await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app.send_get("v1/post/get/slug/original-title").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn update_post_returns_404_for_a_missing_post() {
    let app = helpers::spawn_app().await;
    app.login_as(&app.admin);

    let response = app
        .update_post(&Uuid::new_v4(), &serde_json::json!({ "content": "New" }))
        .await;

    assert_error(response, 404).await;
}

#[tokio::test]
async fn update_post_returns_409_when_renamed_onto_another_post() {
    let app = helpers::spawn_app().await;
    app.create_sample_post_custom("Taken", false).await;
    let other = app.create_sample_post_custom("Free", false).await;

    let response = app
        .update_post(&other, &serde_json::json!({ "title": "TAKEN" }))
        .await;

    assert_error(response, 409).await;
}

// ============================================================================
// Delete Post
// ============================================================================

#[tokio::test]
async fn deleting_a_post_removes_it_and_its_comments() {
    let app = helpers::spawn_app().await;
    let post_id = app.create_sample_post().await;
    app.login_as(&app.member);
    app.add_comment(&post_id, "soon gone", None).await;

    app.login_as(&app.admin);
    let response = app.delete_post(&post_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Post deleted");

    let comments: Value = app.get_all_comments().await.json().await.unwrap();
    assert_eq!(comments, serde_json::json!([]));
    assert_error(app.delete_post(&post_id).await, 404).await;
}

// ============================================================================
// Admin listing
// ============================================================================

#[tokio::test]
async fn admin_listing_filters_by_status() {
    let app = helpers::spawn_app().await;
    app.create_sample_post_custom("Live", false).await;
    app.create_sample_post_custom("Draft one", true).await;
    app.create_sample_post_custom("Draft two", true).await;

    let body: Value = app
        .admin_posts("status=draft")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["posts"][0]["title"], "Draft two");

    let body: Value = app.admin_posts("status=all").await.json().await.unwrap();
    assert_eq!(body["posts"].as_array().unwrap().len(), 3);
    assert_eq!(body["counts"]["published"], 1);

    let body: Value = app.admin_posts("").await.json().await.unwrap();
    assert_eq!(body["totalCount"], 1);
}

#[tokio::test]
async fn admin_listing_rejects_unknown_status() {
    let app = helpers::spawn_app().await;
    app.login_as(&app.admin);

    assert_error(app.admin_posts("status=archived").await, 400).await;
}
