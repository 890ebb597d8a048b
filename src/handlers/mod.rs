pub mod auth;
pub mod clients;
pub mod contacts;
pub mod newsletter;
pub mod projects;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::error::AppError;
use crate::images::ImageStore;
use crate::response::ApiResponse;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Public routes ──
    cfg.route("/auth/login", web::post().to(auth::login));
    cfg.route("/projects", web::get().to(projects::list_projects));
    cfg.route("/clients", web::get().to(clients::list_clients));
    cfg.route("/contact", web::post().to(contacts::submit_contact));
    cfg.service(
        web::scope("/newsletter")
            .route("/subscribe", web::post().to(newsletter::subscribe))
            .route("/unsubscribe", web::post().to(newsletter::unsubscribe)),
    );

    // ── Admin routes (each handler takes the AdminAccess extractor) ──
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/projects")
                    .route(web::get().to(projects::admin_list_projects))
                    .route(web::post().to(projects::create_project)),
            )
            .service(
                web::resource("/projects/{id}")
                    .route(web::put().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project)),
            )
            .service(
                web::resource("/clients")
                    .route(web::get().to(clients::admin_list_clients))
                    .route(web::post().to(clients::create_client)),
            )
            .service(
                web::resource("/clients/{id}")
                    .route(web::put().to(clients::update_client))
                    .route(web::delete().to(clients::delete_client)),
            )
            .route("/contacts", web::get().to(contacts::admin_list_contacts))
            .route("/contacts/{id}", web::delete().to(contacts::delete_contact))
            .route(
                "/subscriptions",
                web::get().to(newsletter::admin_list_subscriptions),
            )
            .route(
                "/subscriptions/{id}",
                web::delete().to(newsletter::delete_subscription),
            ),
    );
}

/// GET / - service banner.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Showcase Platform API" }))
}

/// Fallback for anything no route matched.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::failure("Route not found"))
}

/// Malformed JSON bodies become the standard 400 envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected JSON body: {err}");
        AppError::BadRequest("Invalid request body".to_string()).into()
    })
}

/// Parse a path id, mapping anything that is not a UUID to `InvalidId`.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(message.to_string()))
}

/// Best-effort removal of a stored image. Failures are logged and dropped.
pub(crate) async fn discard_image(images: &ImageStore, public_path: &str) {
    if let Err(e) = images.remove(public_path).await {
        tracing::warn!("Could not remove image {public_path}: {e}");
    }
}
