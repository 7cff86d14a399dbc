//! Post resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::{MessageResponse, PostDto, PostEnvelope, PostPayload, PostsEnvelope};

use crate::middleware::error::{AppError, AppResult, DomainResultExt};
use crate::state::AppState;

/// An id that is not a UUID cannot name any post.
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!(post_id = %raw, "Malformed post id");
        AppError::NotFound
    })
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await.on_failure("Failed to fetch posts")?;

    Ok(HttpResponse::Ok().json(PostsEnvelope {
        posts: posts.into_iter().map(PostDto::from).collect(),
    }))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(body.into_inner().into())
        .await
        .on_failure("Failed to create post")?;

    Ok(HttpResponse::Created().json(MessageResponse::with_post(
        "Post created successfully",
        post.into(),
    )))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let post = state.posts.get(id).await.on_failure("Failed to fetch post")?;

    Ok(HttpResponse::Ok().json(PostEnvelope { post: post.into() }))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let post = state
        .posts
        .update(id, body.into_inner().into())
        .await
        .on_failure("Failed to update post")?;

    Ok(HttpResponse::Ok().json(MessageResponse::with_post(
        "Post updated successfully",
        post.into(),
    )))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    state
        .posts
        .delete(id)
        .await
        .on_failure("Failed to delete post")?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use quill_core::RepoError;
    use quill_core::domain::{Post, PostDraft};
    use quill_core::ports::{BaseRepository, PostRepository};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! send {
        ($app:expr, $req:expr) => {{
            let resp = test::call_service(&$app, $req.to_request()).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    fn timestamp(post: &Value, field: &str) -> DateTime<Utc> {
        post[field].as_str().unwrap().parse().unwrap()
    }

    /// Repository whose every call fails as if the database were down.
    struct UnreachableRepo;

    #[async_trait]
    impl BaseRepository<Post, Uuid> for UnreachableRepo {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }

        async fn insert(&self, _entity: Post) -> Result<Post, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl PostRepository for UnreachableRepo {
        async fn update(&self, _id: Uuid, _draft: PostDraft) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = test_app!(AppState::in_memory());

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Hello", "content": "World" }))
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Post created successfully");
        let id = body["post"]["id"].as_str().unwrap().to_string();

        let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/posts/{id}")));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["post"]["id"], id.as_str());
        assert_eq!(body["post"]["title"], "Hello");
        assert_eq!(body["post"]["content"], "World");
        assert!(body["post"]["createdAt"].is_string());
        assert!(body["post"]["updatedAt"].is_string());
    }

    #[actix_web::test]
    async fn test_create_short_title_is_rejected() {
        let app = test_app!(AppState::in_memory());

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Hi", "content": "World" }))
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(
            body["errors"],
            json!(["Title must be at least 3 characters long"])
        );
    }

    #[actix_web::test]
    async fn test_create_reports_every_violation() {
        let app = test_app!(AppState::in_memory());

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "ab" }))
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"],
            json!([
                "Title must be at least 3 characters long",
                "Content is required"
            ])
        );
    }

    #[actix_web::test]
    async fn test_unknown_id_is_not_found() {
        let app = test_app!(AppState::in_memory());
        let uri = format!("/posts/{}", Uuid::new_v4());

        let (status, body) = send!(app, test::TestRequest::get().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Post not found" }));

        let (status, _) = send!(
            app,
            test::TestRequest::put()
                .uri(&uri)
                .set_json(json!({ "title": "Hello", "content": "World" }))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send!(app, test::TestRequest::delete().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send!(app, test::TestRequest::get().uri("/posts/not-an-id"));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_changes_only_content_fields() {
        let app = test_app!(AppState::in_memory());
        let (_, created) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Hello", "content": "World" }))
        );
        let uri = format!("/posts/{}", created["post"]["id"].as_str().unwrap());
        tokio::time::sleep(Duration::from_millis(5)).await;

        let (status, body) = send!(
            app,
            test::TestRequest::put()
                .uri(&uri)
                .set_json(json!({ "title": "  Hello again ", "content": "Changed" }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Post updated successfully");
        assert_eq!(body["post"]["id"], created["post"]["id"]);
        assert_eq!(body["post"]["createdAt"], created["post"]["createdAt"]);
        assert_eq!(body["post"]["title"], "Hello again");
        let previous = timestamp(&created["post"], "updatedAt");
        assert!(timestamp(&body["post"], "updatedAt") > previous);

        let (_, fetched) = send!(app, test::TestRequest::get().uri(&uri));
        assert_eq!(fetched["post"]["content"], "Changed");
    }

    #[actix_web::test]
    async fn test_update_validates_like_create() {
        let app = test_app!(AppState::in_memory());
        let (_, created) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Hello", "content": "World" }))
        );
        let uri = format!("/posts/{}", created["post"]["id"].as_str().unwrap());

        let (status, body) = send!(
            app,
            test::TestRequest::put()
                .uri(&uri)
                .set_json(json!({ "title": "", "content": "" }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"],
            json!(["Title is required", "Content is required"])
        );

        let (_, fetched) = send!(app, test::TestRequest::get().uri(&uri));
        assert_eq!(fetched["post"]["title"], "Hello");
    }

    #[actix_web::test]
    async fn test_delete_then_get_is_not_found() {
        let app = test_app!(AppState::in_memory());
        let (_, created) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Hello", "content": "World" }))
        );
        let uri = format!("/posts/{}", created["post"]["id"].as_str().unwrap());

        let (status, body) = send!(app, test::TestRequest::delete().uri(&uri));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Post deleted successfully" }));

        let (status, _) = send!(app, test::TestRequest::get().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_list_posts() {
        let app = test_app!(AppState::in_memory());

        let (status, body) = send!(app, test::TestRequest::get().uri("/posts"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "posts": [] }));

        for title in ["First", "Second"] {
            send!(
                app,
                test::TestRequest::post()
                    .uri("/posts")
                    .set_json(json!({ "title": title, "content": "Body" }))
            );
        }

        let (_, body) = send!(app, test::TestRequest::get().uri("/posts"));
        let titles: Vec<&str> = body["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[actix_web::test]
    async fn test_create_accepts_content_beyond_default_json_limit() {
        let app = test_app!(AppState::in_memory());
        let content = "x".repeat(3 * 1024 * 1024);

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Long read", "content": content }))
        );

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["post"]["content"].as_str().unwrap().len(), content.len());
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test_app!(AppState::in_memory());

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .insert_header(ContentType::json())
                .set_payload("{\"title\": ")
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request body");
    }

    #[actix_web::test]
    async fn test_backend_failure_is_internal_error() {
        let app = test_app!(AppState::with_repository(Arc::new(UnreachableRepo)));

        let (status, body) = send!(app, test::TestRequest::get().uri("/posts"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch posts");
        assert!(body["error"].as_str().unwrap().contains("connection refused"));

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "title": "Hello", "content": "World" }))
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to create post");
    }

    #[actix_web::test]
    async fn test_health_reports_store() {
        let app = test_app!(AppState::in_memory());

        let (status, body) = send!(app, test::TestRequest::get().uri("/health"));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "in-memory");
    }
}
