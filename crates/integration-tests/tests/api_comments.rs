//! Nested comment routes: parent existence, ownership, validation.

use axum::http::StatusCode;
use integration_tests::{create_comment, create_post, request, signup, test_app};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn lists_comments_for_an_existing_post() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;
    create_comment(&app, &token, post_id, "first").await;
    create_comment(&app, &token, post_id, "second").await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/posts/{post_id}/comments"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let bodies: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["first", "second"]);
}

#[tokio::test]
async fn listing_under_a_missing_parent_is_not_found() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/posts/{}/comments", Uuid::now_v7()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn anyone_authenticated_may_comment_and_becomes_the_owner() {
    let app = test_app();
    let (_, owner_token) = signup(&app, "a@x.com", "123456").await;
    let (commenter, commenter_token) = signup(&app, "b@x.com", "123456").await;
    let post_id = create_post(&app, &owner_token, "T").await;

    let (status, body) = request(
        &app,
        "POST",
        &format!("/posts/{post_id}/comments"),
        Some(&commenter_token),
        Some(json!({ "comment": { "body": "Nice post!" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], json!(commenter.to_string()));
    assert_eq!(body["post_id"], json!(post_id.to_string()));
}

#[tokio::test]
async fn commenting_on_a_missing_post_is_not_found() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;

    let (status, _) = request(
        &app,
        "POST",
        &format!("/posts/{}/comments", Uuid::now_v7()),
        Some(&token),
        Some(json!({ "comment": { "body": "Ghost comment" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.db.comments.is_empty());
}

#[tokio::test]
async fn blank_comment_body_fails_validation() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    let (status, body) = request(
        &app,
        "POST",
        &format!("/posts/{post_id}/comments"),
        Some(&token),
        Some(json!({ "comment": { "body": "" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!(["Body can't be blank"]));
}

#[tokio::test]
async fn commenting_requires_authentication() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    let (status, _) = request(
        &app,
        "POST",
        &format!("/posts/{post_id}/comments"),
        None,
        Some(json!({ "comment": { "body": "No token!" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owner_can_edit_their_comment() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;
    let comment_id = create_comment(&app, &token, post_id, "original").await;

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/posts/{post_id}/comments/{comment_id}"),
        Some(&token),
        Some(json!({ "comment": { "body": "Edited comment" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"], "Edited comment");
}

#[tokio::test]
async fn editing_someone_elses_comment_is_unauthorized() {
    let app = test_app();
    let (_, owner_token) = signup(&app, "a@x.com", "123456").await;
    let (_, other_token) = signup(&app, "intruder@x.com", "123456").await;
    let post_id = create_post(&app, &owner_token, "T").await;
    let comment_id = create_comment(&app, &owner_token, post_id, "original").await;

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/posts/{post_id}/comments/{comment_id}"),
        Some(&other_token),
        Some(json!({ "comment": { "body": "Hacked" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authorized to update this comment");

    let (_, listing) = request(
        &app,
        "GET",
        &format!("/posts/{post_id}/comments"),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(listing[0]["body"], "original");
}

#[tokio::test]
async fn editing_a_missing_comment_is_not_found() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/posts/{post_id}/comments/{}", Uuid::now_v7()),
        Some(&token),
        Some(json!({ "comment": { "body": "Edited" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Comment not found");
}

#[tokio::test]
async fn owner_can_delete_their_comment() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;
    let comment_id = create_comment(&app, &token, post_id, "bye").await;

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/posts/{post_id}/comments/{comment_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.db.comments.is_empty());
}

#[tokio::test]
async fn deleting_someone_elses_comment_is_unauthorized() {
    let app = test_app();
    let (_, owner_token) = signup(&app, "a@x.com", "123456").await;
    let (_, other_token) = signup(&app, "intruder@x.com", "123456").await;
    let post_id = create_post(&app, &owner_token, "T").await;
    let comment_id = create_comment(&app, &owner_token, post_id, "keep me").await;

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/posts/{post_id}/comments/{comment_id}"),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authorized to delete this comment");
    assert!(app.db.comments.get(&comment_id).is_some());
}
