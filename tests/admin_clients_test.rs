//! Admin client (testimonial) management.
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use image::GenericImageView;
use serde_json::{Value, json};
use uuid::Uuid;

use common::{MultipartBody, TestApp, with_auth};

fn client_form() -> MultipartBody {
    MultipartBody::new()
        .text("name", "Sarah Johnson")
        .text("description", "Delivered on time and beyond expectations.")
        .text("designation", "CEO, TechStart Inc")
}

#[actix_web::test]
async fn test_create_client_with_jpeg_output() {
    let app = TestApp::new().await;
    let service = init_app!(app);

    let req = client_form()
        .file("image", "portrait.jpg", "image/jpeg", &common::png_bytes(300, 900))
        .attach(with_auth(TestRequest::post().uri("/api/admin/clients"), &app.bearer()))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Client created successfully");
    assert_eq!(body["data"]["designation"], "CEO, TechStart Inc");

    let image = body["data"]["image"].as_str().unwrap();
    assert!(image.ends_with(".jpg"));
    let stored = std::fs::read(app.state.images.resolve(image).unwrap()).unwrap();
    assert_eq!(image::guess_format(&stored).unwrap(), image::ImageFormat::Jpeg);
    assert_eq!(
        image::load_from_memory(&stored).unwrap().dimensions(),
        (450, 350)
    );
}

#[actix_web::test]
async fn test_create_client_requires_every_field_and_image() {
    let app = TestApp::new().await;
    let service = init_app!(app);

    let req = MultipartBody::new()
        .text("name", "   ")
        .png("face.png")
        .attach(with_auth(TestRequest::post().uri("/api/admin/clients"), &app.bearer()))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"],
        json!([
            "Client name is required",
            "Client description is required",
            "Client designation is required",
        ])
    );

    let req = client_form()
        .attach(with_auth(TestRequest::post().uri("/api/admin/clients"), &app.bearer()))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Client image is required");

    assert_eq!(app.stored_files(), 0);
}

#[actix_web::test]
async fn test_update_client_without_image_keeps_it() {
    let app = TestApp::new().await;
    let service = init_app!(app);
    let bearer = app.bearer();

    let req = client_form()
        .png("face.png")
        .attach(with_auth(TestRequest::post().uri("/api/admin/clients"), &bearer))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&service, req).await).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = MultipartBody::new()
        .text("name", "Sarah J.")
        .text("description", "Still great.")
        .text("designation", "Chair, TechStart Inc")
        .attach(with_auth(
            TestRequest::put().uri(&format!("/api/admin/clients/{id}")),
            &bearer,
        ))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Client updated successfully");
    assert_eq!(body["data"]["name"], "Sarah J.");
    assert_eq!(body["data"]["designation"], "Chair, TechStart Inc");
    assert_eq!(body["data"]["image"], created["data"]["image"]);
    assert_eq!(app.stored_files(), 1);
}

#[actix_web::test]
async fn test_client_not_found_and_invalid_id() {
    let app = TestApp::new().await;
    let service = init_app!(app);
    let bearer = app.bearer();

    let req = with_auth(
        TestRequest::delete().uri(&format!("/api/admin/clients/{}", Uuid::new_v4())),
        &bearer,
    )
    .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Client not found");

    let req = with_auth(TestRequest::delete().uri("/api/admin/clients/12345"), &bearer)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid client ID");
}

#[actix_web::test]
async fn test_delete_client_removes_image() {
    let app = TestApp::new().await;
    let service = init_app!(app);
    let bearer = app.bearer();

    let req = client_form()
        .png("face.png")
        .attach(with_auth(TestRequest::post().uri("/api/admin/clients"), &bearer))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&service, req).await).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = with_auth(
        TestRequest::delete().uri(&format!("/api/admin/clients/{id}")),
        &bearer,
    )
    .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Client deleted successfully");
    assert_eq!(app.stored_files(), 0);

    let listing: Value = test::read_body_json(
        test::call_service(&service, TestRequest::get().uri("/api/clients").to_request()).await,
    )
    .await;
    assert_eq!(listing["count"], 0);
}

#[actix_web::test]
async fn test_client_mutations_without_token_change_nothing() {
    let app = TestApp::new().await;
    let service = init_app!(app);

    let req = client_form()
        .png("face.png")
        .attach(TestRequest::post().uri("/api/admin/clients"))
        .to_request();
    assert_eq!(
        test::call_service(&service, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.stored_files(), 0);

    let req = client_form()
        .png("face.png")
        .attach(with_auth(TestRequest::post().uri("/api/admin/clients"), &app.bearer()))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&service, req).await).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(app.stored_files(), 1);

    let req = MultipartBody::new()
        .text("name", "Impostor")
        .text("description", "Fake review")
        .text("designation", "Nobody")
        .png("impostor.png")
        .attach(TestRequest::put().uri(&format!("/api/admin/clients/{id}")))
        .to_request();
    assert_eq!(
        test::call_service(&service, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = TestRequest::delete()
        .uri(&format!("/api/admin/clients/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&service, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let listing: Value = test::read_body_json(
        test::call_service(&service, TestRequest::get().uri("/api/clients").to_request()).await,
    )
    .await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["data"][0], created["data"]);
    assert_eq!(app.stored_files(), 1);
}
