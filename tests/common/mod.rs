//! Shared harness for the integration tests.
//!
//! Each test gets its own in-memory SQLite database (migrated with the real
//! `Migrator`) and its own temporary upload directory.
#![allow(dead_code)]

use std::io::Cursor;

use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::test::TestRequest;
use chrono::TimeDelta;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tempfile::TempDir;

use showcase_backend::config::AppConfig;
use showcase_backend::db::admins as admin_db;
use showcase_backend::models::admins::{self, CreateAdmin};
use showcase_backend::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub state: AppState,
    // Dropped with the test, removing every stored image.
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        // One connection, otherwise every pooled connection sees its own empty database.
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            jwt_secret: TEST_SECRET.to_string(),
            jwt_ttl: TimeDelta::days(7),
            upload_dir: upload_dir.path().to_path_buf(),
            max_upload_bytes: 5 * 1024 * 1024,
        };

        Self {
            state: AppState::new(db, &config),
            upload_dir,
        }
    }

    /// A valid bearer header value for the admin routes.
    pub fn bearer(&self) -> String {
        let token = self
            .state
            .tokens
            .issue("test-admin")
            .expect("Failed to issue test token");
        format!("Bearer {token}")
    }

    pub async fn create_admin(&self, username: &str, password: &str) -> admins::Model {
        admin_db::insert_admin(
            self.state.db.get_ref(),
            CreateAdmin {
                username: username.to_string(),
                password_hash: bcrypt::hash(password, 4).unwrap(),
                email: format!("{username}@showcase.com"),
            },
        )
        .await
        .expect("Failed to insert admin")
    }

    /// Number of files currently in the upload directory.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Build the real application around a test harness.
macro_rules! init_app {
    ($test_app:expr) => {{
        let state = $test_app.state.clone();
        actix_web::test::init_service(
            actix_web::App::new().configure(move |cfg| state.configure(cfg)),
        )
        .await
    }};
}

/// Encode a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 80, 40])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Hand-rolled `multipart/form-data` body.
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----showcase-test-boundary-7MA4YWxkTrZu0gW".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn png(self, file_name: &str) -> Self {
        self.file("image", file_name, "image/png", &png_bytes(800, 600))
    }

    /// Attach the body to a request builder.
    pub fn attach(mut self, req: TestRequest) -> TestRequest {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        req.insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", self.boundary),
        ))
        .set_payload(self.body)
    }
}

pub fn with_auth(req: TestRequest, bearer: &str) -> TestRequest {
    req.insert_header((AUTHORIZATION, bearer.to_string()))
}
