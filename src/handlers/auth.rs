use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::jwt::TokenService;
use crate::auth::password::verify_password;
use crate::db::admins as admin_db;
use crate::error::AppError;
use crate::models::admins::AdminResponse;
use crate::validation::fields_from_json;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    message: &'static str,
    token: String,
    admin: AdminResponse,
}

/// POST /api/auth/login - exchange admin credentials for a bearer token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    tokens: web::Data<TokenService>,
    body: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<HttpResponse, AppError> {
    let mut fields = fields_from_json(body.into_inner());
    let (Some(username), Some(password)) = (
        fields.remove("username").filter(|u| !u.is_empty()),
        fields.remove("password").filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Please provide username and password".to_string(),
        ));
    };

    let Some(admin) = admin_db::find_by_username(db.get_ref(), &username).await? else {
        tracing::debug!("Login attempt for unknown admin {username}");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    // bcrypt is CPU-bound; keep it off the async workers.
    let hash = admin.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check interrupted: {e}")))??;
    if !matches {
        tracing::debug!("Wrong password for admin {username}");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let admin = admin_db::record_login(db.get_ref(), admin).await?;
    let token = tokens
        .issue(&admin.id.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!("Admin {} logged in", admin.username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful",
        token,
        admin: admin.into(),
    }))
}
