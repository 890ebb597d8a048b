use actix_files::Files;
use actix_web::web;
use sea_orm::DatabaseConnection;

use crate::auth::jwt::TokenService;
use crate::config::AppConfig;
use crate::handlers;
use crate::images::{ImageStore, PUBLIC_PREFIX};
use crate::upload::UploadLimits;

/// Shared services registered as app data on every worker.
#[derive(Clone)]
pub struct AppState {
    pub db: web::Data<DatabaseConnection>,
    pub tokens: web::Data<TokenService>,
    pub images: web::Data<ImageStore>,
    pub limits: web::Data<UploadLimits>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        Self {
            db: web::Data::new(db),
            tokens: web::Data::new(TokenService::new(&config.jwt_secret, config.jwt_ttl)),
            images: web::Data::new(ImageStore::new(config.upload_dir.clone())),
            limits: web::Data::new(UploadLimits {
                max_bytes: config.max_upload_bytes,
            }),
        }
    }

    /// Register app data, the API routes, static uploads and the 404 fallback.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.db.clone())
            .app_data(self.tokens.clone())
            .app_data(self.images.clone())
            .app_data(self.limits.clone())
            .app_data(handlers::json_config())
            .route("/", web::get().to(handlers::index))
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new(PUBLIC_PREFIX, self.images.root()))
            .default_service(web::to(handlers::not_found));
    }
}
