use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use super::{discard_image, parse_id};
use crate::auth::middleware::AdminAccess;
use crate::db::clients as client_db;
use crate::error::AppError;
use crate::images::ImageStore;
use crate::models::Patch;
use crate::models::clients::{CreateClient, UpdateClient};
use crate::response::ApiResponse;
use crate::upload::{UploadLimits, read_image_form};
use crate::validation::{CLIENT_RULES, validate};

const NOT_FOUND: &str = "Client not found";
const INVALID_ID: &str = "Invalid client ID";

/// GET /api/clients - public listing, newest first.
pub async fn list_clients(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let clients = client_db::get_all_clients(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(clients)))
}

/// GET /api/admin/clients
pub async fn admin_list_clients(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    list_clients(db).await
}

/// POST /api/admin/clients - multipart form with a mandatory `image`.
pub async fn create_client(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    limits: web::Data<UploadLimits>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_image_form(payload, &limits).await?;
    let mut fields = validate(CLIENT_RULES, &form.fields)?;
    let Some(upload) = form.image else {
        return Err(AppError::MissingRequiredUpload(
            "Client image is required".to_string(),
        ));
    };

    let image = images.store(upload).await?;
    let input = CreateClient {
        name: fields.take_required("name"),
        description: fields.take_required("description"),
        designation: fields.take_required("designation"),
        image: image.clone(),
    };

    let client = match client_db::insert_client(db.get_ref(), input).await {
        Ok(client) => client,
        Err(e) => {
            discard_image(&images, &image).await;
            return Err(e.into());
        }
    };

    tracing::info!("Created client {}", client.id);
    Ok(HttpResponse::Created().json(ApiResponse::with_data("Client created successfully", client)))
}

/// PUT /api/admin/clients/{id}
pub async fn update_client(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    limits: web::Data<UploadLimits>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_image_form(payload, &limits).await?;
    let mut fields = validate(CLIENT_RULES, &form.fields)?;

    let id = parse_id(&path, INVALID_ID)?;
    let Some(client) = client_db::get_client_by_id(db.get_ref(), id).await? else {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    };
    let old_image = client.image.clone();

    let new_image = match form.image {
        Some(upload) => Some(images.store(upload).await?),
        None => None,
    };

    let input = UpdateClient {
        name: Patch::non_empty(fields.take("name")),
        description: Patch::non_empty(fields.take("description")),
        designation: Patch::non_empty(fields.take("designation")),
        image: new_image.clone(),
    };

    match client_db::update_client(db.get_ref(), client, input).await {
        Ok(updated) => {
            if new_image.is_some() {
                discard_image(&images, &old_image).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::with_data("Client updated successfully", updated)))
        }
        Err(e) => {
            if let Some(image) = &new_image {
                discard_image(&images, image).await;
            }
            Err(e.into())
        }
    }
}

/// DELETE /api/admin/clients/{id}
pub async fn delete_client(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path, INVALID_ID)?;
    let Some(client) = client_db::get_client_by_id(db.get_ref(), id).await? else {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    };

    discard_image(&images, &client.image).await;
    client_db::delete_client(db.get_ref(), id).await?;

    tracing::info!("Deleted client {id}");
    Ok(HttpResponse::Ok().json(ApiResponse::message("Client deleted successfully")))
}
