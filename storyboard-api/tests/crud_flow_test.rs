/// CRUD flow integration tests
///
/// Validation and response-shape behavior runs against the offline router;
/// the full lifecycle and owner-scoping tests need a live Postgres and are
/// `#[ignore]`d (`DATABASE_URL=... cargo test -- --ignored`).

mod common;

use axum::http::StatusCode;
use common::{delete, get, offline_app, post_json, send, TestContext};
use serde_json::json;

#[tokio::test]
async fn register_rejects_invalid_email_before_the_store() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        post_json(
            "/v1/auth/register",
            None,
            json!({ "email": "not-an-email", "password": "password1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn register_rejects_weak_password_before_the_store() {
    let app = offline_app();

    // Long enough, but all digits
    let (status, body) = send(
        &app,
        post_json(
            "/v1/auth/register",
            None,
            json!({ "email": "ada@example.com", "password": "123456789" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "password");
}

#[tokio::test]
async fn board_creation_requires_a_token() {
    let app = offline_app();

    let (status, _) = send(
        &app,
        post_json("/v1/boards", None, json!({ "title": "Sprint 12" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn board_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let token = Some(ctx.token.as_str());

    // Create
    let (status, body) = send(
        &ctx.app,
        post_json("/v1/boards", token, json!({ "title": "Sprint 12" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["board"]["title"], "Sprint 12");
    let board_id = body["board"]["id"].as_str().unwrap().to_string();

    // List is shaped { "boards": [...] } and contains the new board
    let (status, body) = send(&ctx.app, get("/v1/boards", token)).await;
    assert_eq!(status, StatusCode::OK);
    let boards = body["boards"].as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["id"], board_id);

    // Get one
    let (status, body) = send(&ctx.app, get(&format!("/v1/boards/{}", board_id), token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"]["id"], board_id);

    // Delete, then it is gone
    let (status, _) = send(&ctx.app, delete(&format!("/v1/boards/{}", board_id), &ctx.token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&ctx.app, get(&format!("/v1/boards/{}", board_id), token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn documents_are_invisible_across_users() {
    let ctx = TestContext::new().await.unwrap();
    let (other, other_token) = ctx.other_user().await.unwrap();

    let (_, body) = send(
        &ctx.app,
        post_json(
            "/v1/boards",
            Some(&ctx.token),
            json!({ "title": "Private board" }),
        ),
    )
    .await;
    let board_id = body["board"]["id"].as_str().unwrap().to_string();

    // The other user cannot list, fetch, or delete it
    let (status, body) = send(&ctx.app, get("/v1/boards", Some(&other_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["boards"].as_array().unwrap().is_empty());

    let (status, _) = send(
        &ctx.app,
        get(&format!("/v1/boards/{}", board_id), Some(&other_token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &ctx.app,
        delete(&format!("/v1/boards/{}", board_id), &other_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still there for the owner
    let (status, _) = send(
        &ctx.app,
        get(&format!("/v1/boards/{}", board_id), Some(&ctx.token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    ctx.delete_user(other.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn stories_attach_to_owned_boards() {
    let ctx = TestContext::new().await.unwrap();
    let token = Some(ctx.token.as_str());

    let (_, body) = send(
        &ctx.app,
        post_json("/v1/boards", token, json!({ "title": "Backlog" })),
    )
    .await;
    let board_id = body["board"]["id"].as_str().unwrap().to_string();

    // Via the board endpoint
    let (status, body) = send(
        &ctx.app,
        post_json(
            &format!("/v1/boards/{}/stories", board_id),
            token,
            json!({ "title": "As a user...", "description": "First story" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["story"]["board_id"], board_id);

    // Via the stories endpoint
    let (status, _) = send(
        &ctx.app,
        post_json(
            "/v1/stories",
            token,
            json!({ "title": "Another story", "board_id": board_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Foreign board id behaves like a missing one
    let (other, other_token) = ctx.other_user().await.unwrap();
    let (status, _) = send(
        &ctx.app,
        post_json(
            "/v1/stories",
            Some(&other_token),
            json!({ "title": "Sneaky", "board_id": board_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&ctx.app, get("/v1/stories", token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stories"].as_array().unwrap().len(), 2);

    ctx.delete_user(other.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn register_login_me_flow() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email();

    let (status, body) = send(
        &ctx.app,
        post_json(
            "/v1/auth/register",
            None,
            json!({ "email": email, "password": "password1", "name": "Grace" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());

    // Same email again conflicts, case-insensitively
    let (status, _) = send(
        &ctx.app,
        post_json(
            "/v1/auth/register",
            None,
            json!({ "email": email.to_uppercase(), "password": "password1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Login with the right password, then use the token
    let (status, body) = send(
        &ctx.app,
        post_json(
            "/v1/auth/login",
            None,
            json!({ "email": email, "password": "password1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = send(&ctx.app, get("/v1/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email.to_lowercase());

    // Wrong password and unknown email are the same 401
    let (status, body) = send(
        &ctx.app,
        post_json(
            "/v1/auth/login",
            None,
            json!({ "email": email, "password": "wrong-password1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    // Refresh yields a usable access token
    let (status, body) = send(
        &ctx.app,
        post_json(
            "/v1/auth/refresh",
            None,
            json!({ "refresh_token": refresh_token }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let refreshed = body["access_token"].as_str().unwrap().to_string();
    let (status, _) = send(&ctx.app, get("/v1/users/me", Some(&refreshed))).await;
    assert_eq!(status, StatusCode::OK);

    // Registered user cleanup
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email.to_lowercase())
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}
