/// HTTP tests for posts, likes and comments
mod common;

use actix_web::{http::StatusCode, test};
use common::{create_post, register, setup_test_app, user_id, MemoryStore};
use serde_json::{json, Value};
use uuid::Uuid;

#[actix_web::test]
async fn test_like_twice_is_rejected() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let author = register(&app, "Ada", "ada@example.com").await;
    let viewer = register(&app, "Bob", "bob@example.com").await;

    let post = create_post(&app, &author, "hello world").await;
    assert_eq!(post["text"], "hello world");
    assert_eq!(post["name"], "Ada");
    assert_eq!(post["user"], user_id(&author).to_string());
    assert_eq!(post["likes"], json!([]));
    assert_eq!(post["comments"], json!([]));
    let uri = format!("/api/posts/like/{}", post["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("x-auth-token", viewer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let likes: Value = test::read_body_json(resp).await;
    assert_eq!(likes, json!([{ "user": user_id(&viewer).to_string() }]));

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("x-auth-token", viewer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Post already liked");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post["id"].as_str().unwrap()))
        .insert_header(("x-auth-token", viewer.as_str()))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["likes"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_unlike() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let author = register(&app, "Ada", "ada@example.com").await;
    let post = create_post(&app, &author, "hello world").await;
    let id = post["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/unlike/{}", id))
        .insert_header(("x-auth-token", author.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Post has not yet been liked");

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{}", id))
        .insert_header(("x-auth-token", author.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/unlike/{}", id))
        .insert_header(("x-auth-token", author.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let likes: Value = test::read_body_json(resp).await;
    assert_eq!(likes, json!([]));
}

#[actix_web::test]
async fn test_unlike_keeps_other_likes() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let first = register(&app, "Ada", "ada@example.com").await;
    let second = register(&app, "Bob", "bob@example.com").await;
    let post = create_post(&app, &first, "hello world").await;
    let id = post["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{}", id))
        .insert_header(("x-auth-token", first.as_str()))
        .to_request();
    let before: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(before, json!([{ "user": user_id(&first).to_string() }]));

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{}", id))
        .insert_header(("x-auth-token", second.as_str()))
        .to_request();
    let likes: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        likes,
        json!([
            { "user": user_id(&second).to_string() },
            { "user": user_id(&first).to_string() }
        ])
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/unlike/{}", id))
        .insert_header(("x-auth-token", second.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let after: Value = test::read_body_json(resp).await;
    assert_eq!(after, before);
}

#[actix_web::test]
async fn test_list_newest_first() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let token = register(&app, "Ada", "ada@example.com").await;

    create_post(&app, &token, "first").await;
    create_post(&app, &token, "second").await;
    create_post(&app, &token, "third").await;
    assert_eq!(store.post_count(), 3);

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(("x-auth-token", token.as_str()))
        .to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    let texts: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}

#[actix_web::test]
async fn test_missing_post() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let token = register(&app, "Ada", "ada@example.com").await;

    for uri in [
        "/api/posts/not-an-id".to_string(),
        format!("/api/posts/{}", Uuid::new_v4()),
    ] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(("x-auth-token", token.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["msg"], "Post not found");
    }

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{}", Uuid::new_v4()))
        .insert_header(("x-auth-token", token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", Uuid::new_v4()))
        .insert_header(("x-auth-token", token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_post_requires_author() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let author = register(&app, "Ada", "ada@example.com").await;
    let other = register(&app, "Bob", "bob@example.com").await;
    let post = create_post(&app, &author, "mine").await;
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("x-auth-token", other.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "User not authorized");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("x-auth-token", other.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("x-auth-token", author.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Post removed");
    assert_eq!(store.post_count(), 0);
}

#[actix_web::test]
async fn test_comments() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let author = register(&app, "Ada", "ada@example.com").await;
    let other = register(&app, "Bob", "bob@example.com").await;
    let post = create_post(&app, &author, "discuss").await;
    let post_id = post["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/comment/{}", post_id))
        .insert_header(("x-auth-token", author.as_str()))
        .set_json(json!({ "text": "first!" }))
        .to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comments.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/comment/{}", post_id))
        .insert_header(("x-auth-token", other.as_str()))
        .set_json(json!({ "text": "  second  " }))
        .to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    let comments = comments.as_array().unwrap().clone();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "second");
    assert_eq!(comments[0]["name"], "Bob");
    assert_eq!(comments[0]["user"], user_id(&other).to_string());
    assert_eq!(comments[1]["text"], "first!");

    let first_id = comments[1]["id"].as_str().unwrap();
    let second_id = comments[0]["id"].as_str().unwrap();

    // Only the comment's author may delete it
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/comment/{}/{}", post_id, first_id))
        .insert_header(("x-auth-token", other.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "User not authorized");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/comment/{}/{}", post_id, second_id))
        .insert_header(("x-auth-token", other.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let remaining: Value = test::read_body_json(resp).await;
    let remaining = remaining.as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], first_id);

    for comment_id in [Uuid::new_v4().to_string(), "bogus".to_string()] {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/comment/{}/{}", post_id, comment_id))
            .insert_header(("x-auth-token", author.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["msg"], "Comment does not exist");
    }
}

#[actix_web::test]
async fn test_blank_text_rejected() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;
    let token = register(&app, "Ada", "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("x-auth-token", token.as_str()))
        .set_json(json!({ "text": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "errors": [{ "msg": "Text is required", "param": "text" }] }));
    assert_eq!(store.post_count(), 0);

    let post = create_post(&app, &token, "ok").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/comment/{}", post["id"].as_str().unwrap()))
        .insert_header(("x-auth-token", token.as_str()))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_posts_require_token() {
    let store = MemoryStore::new();
    let app = setup_test_app(&store).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "text": "anonymous" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.post_count(), 0);
}
