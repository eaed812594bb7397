use crate::post::post_form::read_post_form;
use crate::post::post_model::UpdatePostRequest;
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Create a post from a multipart form
/// POST /api/posts
pub async fn create_post(
    post_service: web::Data<PostService>,
    payload: Multipart,
) -> Result<HttpResponse, CustomError> {
    let form = read_post_form(payload).await?;
    let post = post_service.create_post(form).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post added successfully!",
        "httpStatusCode": 200,
        "service": service_name(),
        "post": post
    })))
}

/// List every post
/// GET /api/posts
pub async fn get_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, CustomError> {
    let posts = post_service.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Update title and description, and optionally the image URL
/// PUT /api/posts/{id}
pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    body: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .update_post(&post_id.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post updated successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "post": post
    })))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    post_service.delete_post(&post_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post deleted successfully",
        "httpStatusCode": 200,
        "service": service_name(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::database::store::PostStore;
    use crate::middleware::error_handler::handle_error;
    use crate::middleware::not_found::not_found;
    use crate::post::test_support::{Harness, multipart_body, multipart_content_type};
    use crate::router::index::routes;
    use actix_web::http::{StatusCode, header};
    use actix_web::middleware::ErrorHandlers;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    macro_rules! init_app {
        ($harness:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($harness.service()))
                    .configure(routes)
                    .wrap(
                        ErrorHandlers::new()
                            .handler(StatusCode::NOT_FOUND, not_found)
                            .default_handler(handle_error),
                    ),
            )
            .await
        };
    }

    fn create_request(title: &str, description: &str, with_image: bool) -> test::TestRequest {
        let image: &[u8] = b"\x89PNG fake image bytes";
        let body = multipart_body(
            &[("title", title), ("description", description)],
            with_image.then_some(("image", "cat.png", image)),
        );
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn create_returns_post_with_hosted_image() {
        let harness = Harness::new();
        let app = init_app!(harness);

        let resp = test::call_service(&app, create_request("Alpha", "first", true).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["post"]["title"], "Alpha");

        let uploads = harness.host.uploads.lock().unwrap().clone();
        assert_eq!(body["post"]["imageUrl"], uploads[0].secure_url.as_str());
        assert_eq!(harness.store.len().await, 1);
    }

    #[actix_web::test]
    async fn create_with_missing_field_is_rejected_before_upload() {
        let harness = Harness::new();
        let app = init_app!(harness);

        for req in [
            create_request("", "first", true),
            create_request("Alpha", "", true),
            create_request("Alpha", "first", false),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "VALIDATION_ERROR");
        }

        assert_eq!(harness.host.upload_count(), 0);
        assert!(harness.store.is_empty().await);
    }

    #[actix_web::test]
    async fn list_on_empty_store_is_empty_array() {
        let harness = Harness::new();
        let app = init_app!(harness);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn five_created_posts_are_all_listed() {
        let harness = Harness::new();
        let app = init_app!(harness);

        for n in 1..=5 {
            let req = create_request(&format!("Post {}", n), "body", true);
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        let posts = body.as_array().unwrap();
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[4]["title"], "Post 5");
        assert!(posts.iter().all(|post| post["_id"].is_string()));
    }

    #[actix_web::test]
    async fn update_overwrites_fields_in_place() {
        let harness = Harness::new();
        let app = init_app!(harness);

        let resp = test::call_service(&app, create_request("Alpha", "first", true).to_request()).await;
        let created: Value = test::read_body_json(resp).await;
        let id = created["post"]["_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", id))
            .set_json(json!({ "title": "Beta", "description": "second" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["post"]["_id"], id.as_str());
        assert_eq!(body["post"]["title"], "Beta");
        assert_eq!(body["post"]["imageUrl"], created["post"]["imageUrl"]);
    }

    #[actix_web::test]
    async fn update_errors_leave_store_unchanged() {
        let harness = Harness::new();
        let app = init_app!(harness);

        let resp = test::call_service(&app, create_request("Alpha", "first", true).to_request()).await;
        let created: Value = test::read_body_json(resp).await;
        let id = created["post"]["_id"].as_str().unwrap().to_string();
        let before = harness.store.find_all().await.unwrap();

        let missing = test::TestRequest::put()
            .uri("/api/posts/000000000000000000000000")
            .set_json(json!({ "title": "Beta", "description": "second" }))
            .to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);

        let blank = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", id))
            .set_json(json!({ "title": "", "description": "second" }))
            .to_request();
        assert_eq!(test::call_service(&app, blank).await.status(), StatusCode::BAD_REQUEST);

        let malformed = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", id))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, malformed).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");

        assert_eq!(harness.store.find_all().await.unwrap(), before);
    }

    #[actix_web::test]
    async fn delete_then_list_no_longer_contains_post() {
        let harness = Harness::new();
        let app = init_app!(harness);

        let resp = test::call_service(&app, create_request("Alpha", "first", true).to_request()).await;
        let created: Value = test::read_body_json(resp).await;
        let id = created["post"]["_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete().uri(&format!("/api/posts/{}", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Post deleted successfully");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));

        let again = test::TestRequest::delete().uri(&format!("/api/posts/{}", id)).to_request();
        let resp = test::call_service(&app, again).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Not Found: Post not found");
    }

    #[actix_web::test]
    async fn unknown_route_uses_envelope() {
        let harness = Harness::new();
        let app = init_app!(harness);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Route does not exist");
    }
}
